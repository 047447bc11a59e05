//! # GOES XRS report reader
//!
//! The yearly reports are fixed-width text files, one event per line:
//!
//! ```text
//! 31777020101  1150 1205 1157 N17E68 C    13    9830 2.6E-03
//! 31777020102  0348 0403 0353        B    58
//! ```
//!
//! Row layout
//! -----------------
//! * first token: station code and date, the date is characters `5..11` (`YYMMDD`),
//! * then `start`, `end` and `peak` as `HHMM`,
//! * an optional disk location such as `N17E68`, dropped here,
//! * the class letter, or a full class such as `C1.3`,
//! * an optional two digit intensity (`13` reads as `1.3`),
//! * trailing fields that are not used.
//!
//! Lines whose first token is not made of digits are not data rows and are ignored.
//!
//! Archive layout
//! -----------------
//! [`GoesArchive`] builds the report URL of a given year. Two years are published under
//! a different name: 2015 (`_modifiedreplacedmissingrows`) and 2017 (`-ytd`).
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog_source::CatalogSource;
use crate::constants::{GOES_DATE_RANGE, GOES_XRS_BASE_URL};
use crate::events::ClassificationEvent;
use crate::flarecat_errors::{FlareCatError, ParseRowError};
use crate::time::parse_goes_date;

use super::{normalize_classification, read_catalog, GoesCatalog};

static LOCATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[NS]\d{2}[EW]\d{2}$").unwrap());

/// Is the token a disk location such as `N17E68`?
pub fn is_location_token(token: &str) -> bool {
    LOCATION_TOKEN.is_match(token)
}

/// Parse one line of a GOES report.
///
/// Return
/// ----------
/// * `Ok(None)` if the line is not a data row,
/// * `Ok(Some(event))` for a valid row,
/// * `Err(FlareCatError)` if the row must be skipped.
pub fn parse_goes_line(line: &str) -> Result<Option<ClassificationEvent>, FlareCatError> {
    let mut tokens = line.split_whitespace();

    let code = match tokens.next() {
        Some(code) if code.chars().all(|c| c.is_ascii_digit()) => code,
        _ => return Ok(None),
    };

    let raw_date = code
        .get(GOES_DATE_RANGE)
        .ok_or_else(|| ParseRowError::InvalidDate(code.to_string()))?;
    let date = parse_goes_date(raw_date)?;

    let fields: Vec<&str> = tokens
        .enumerate()
        .filter(|(idx, token)| !(*idx == 3 && is_location_token(token)))
        .map(|(_, token)| token)
        .collect();

    normalize_classification(&fields, date).map(Some)
}

/// Read one GOES report.
///
/// Arguments
/// -----------------
/// * `text`: content of the report
/// * `source`: label used to report skipped rows
pub fn read_goes(text: &str, source: &str) -> GoesCatalog {
    read_catalog(text, source, parse_goes_line)
}

/// Location of the yearly GOES XRS reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoesArchive {
    base_url: String,
}

impl Default for GoesArchive {
    fn default() -> Self {
        GoesArchive::new(GOES_XRS_BASE_URL)
    }
}

impl GoesArchive {
    /// Archive rooted at `base_url` (no trailing slash needed).
    pub fn new(base_url: &str) -> Self {
        GoesArchive {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the report of `year`.
    pub fn report_url(&self, year: i32) -> String {
        let suffix = match year {
            2015 => "_modifiedreplacedmissingrows",
            2017 => "-ytd",
            _ => "",
        };
        format!("{}/goes-xrs-report_{year}{suffix}.txt", self.base_url)
    }

    pub fn report_source(&self, year: i32) -> CatalogSource {
        CatalogSource::Url(self.report_url(year))
    }

    /// Sources for a range of years, in order.
    pub fn sources(&self, years: impl IntoIterator<Item = i32>) -> Vec<CatalogSource> {
        years
            .into_iter()
            .map(|year| self.report_source(year))
            .collect()
    }
}
