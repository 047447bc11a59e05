//! # Record normalizer
//!
//! Turns raw catalog rows (already split into string fields) into typed events.
//!
//! ## Overview
//! -----------------
//! * [`normalize_location`] – HESSI fields → [`LocationEvent`].
//! * [`normalize_classification`] – GOES fields → [`ClassificationEvent`].
//! * [`CatalogLoad`] – the result of loading a whole catalog: the events plus the
//!   list of rows that were skipped and why.
//! * [`hessi_reader`] / [`goes_reader`] – line tokenizers for the two text formats.
//! * [`catalog_file`] – the [`CatalogFile`](catalog_file::CatalogFile) ingestion trait.
//!
//! ## Timestamps
//! -----------------
//! Every time of a row is combined with the row's [`CatalogDate`]. Then, independently,
//! `peak < start` moves `peak` one day forward and `end < start` moves `end` one day
//! forward (see [`roll_over`]). If `start <= peak <= end` still fails, the row is rejected
//! with [`FlareCatError::DataIntegrityViolation`]; events longer than a day are not
//! representable.
//!
//! ## Error policy
//! -----------------
//! A bad row never aborts a load. It is recorded as a [`SkippedRow`] carrying one of:
//! * [`FlareCatError::ParseError`] – wrong field count, non-numeric integer, bad date/time/class,
//! * [`FlareCatError::MissingValue`] – a field holds the missing-value marker (`////`); the
//!   row is dropped before any numeric parsing,
//! * [`FlareCatError::DataIntegrityViolation`] – inverted interval after rollover.
use std::str::FromStr;

use log::{debug, info, warn};

use crate::constants::{
    GOES_MANDATORY_FIELDS, GOES_MAX_INTENSITY_DIGITS, HESSI_MANDATORY_FIELDS, MISSING_MARKER,
};
use crate::events::{ClassificationEvent, FlareClass, LocationEvent, QualityFlags};
use crate::flarecat_errors::{FlareCatError, ParseRowError};
use crate::time::{check_ordering, parse_hhmm, parse_hms, roll_over, CatalogDate, TimeOfDay};

pub mod catalog_file;
pub mod goes_reader;
pub mod hessi_reader;

/// A row that could not be turned into an event.
///
/// # Fields
///
/// * `source` - label of the catalog source the row comes from
/// * `line` - 1-based line number in that source
/// * `reason` - why the row was dropped
#[derive(Debug)]
pub struct SkippedRow {
    pub source: String,
    pub line: usize,
    pub reason: FlareCatError,
}

/// Events loaded from one or more catalog sources, with the rows that were skipped.
///
/// Events keep the order of the sources and of the lines inside each source.
#[derive(Debug)]
pub struct CatalogLoad<T> {
    pub events: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

/// HESSI flare list once normalized.
pub type HessiCatalog = CatalogLoad<LocationEvent>;
/// Concatenated GOES reports once normalized.
pub type GoesCatalog = CatalogLoad<ClassificationEvent>;

impl<T> Default for CatalogLoad<T> {
    fn default() -> Self {
        CatalogLoad {
            events: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> CatalogLoad<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append another load after this one.
    pub fn extend(&mut self, other: CatalogLoad<T>) {
        self.events.extend(other.events);
        self.skipped.extend(other.skipped);
    }

    fn count_kind(&self, kind: &str) -> usize {
        self.skipped
            .iter()
            .filter(|row| row.reason.kind() == kind)
            .count()
    }

    /// Rows rejected with a [`FlareCatError::ParseError`].
    pub fn parse_errors(&self) -> usize {
        self.count_kind("parse")
    }

    /// Rows dropped because of a missing-value marker.
    pub fn missing_rows(&self) -> usize {
        self.count_kind("missing")
    }

    /// Rows whose interval was still inverted after rollover.
    pub fn integrity_violations(&self) -> usize {
        self.count_kind("integrity")
    }
}

/// Read a whole catalog text with a line parser.
///
/// `parse_line` returns `Ok(None)` for lines that are not data (headers, footers,
/// blank lines). All lines are decoded first, then split between events and skipped
/// rows; nothing is removed from a collection while it is being walked.
pub(crate) fn read_catalog<T, F>(text: &str, source: &str, parse_line: F) -> CatalogLoad<T>
where
    F: Fn(&str) -> Result<Option<T>, FlareCatError>,
{
    let decoded: Vec<(usize, Result<Option<T>, FlareCatError>)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, parse_line(line)))
        .collect();

    let mut load = CatalogLoad::new();
    for (line, result) in decoded {
        match result {
            Ok(Some(event)) => load.events.push(event),
            Ok(None) => {}
            Err(reason) => {
                debug!("{source}:{line}: row skipped ({reason})");
                load.skipped.push(SkippedRow {
                    source: source.to_string(),
                    line,
                    reason,
                });
            }
        }
    }

    if load.skipped.is_empty() {
        info!("{source}: {} events loaded", load.events.len());
    } else {
        warn!(
            "{source}: {} events loaded, {} rows skipped (parse: {}, missing: {}, integrity: {})",
            load.events.len(),
            load.skipped.len(),
            load.parse_errors(),
            load.missing_rows(),
            load.integrity_violations()
        );
    }
    load
}

/// Is the field a missing-value marker such as `////`?
pub fn is_missing_marker(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c == MISSING_MARKER)
}

fn reject_missing(fields: &[&str]) -> Result<(), FlareCatError> {
    match fields.iter().find(|f| is_missing_marker(f)) {
        Some(marker) => Err(FlareCatError::MissingValue(marker.to_string())),
        None => Ok(()),
    }
}

fn parse_int<N: FromStr>(field: &'static str, value: &str) -> Result<N, ParseRowError> {
    value
        .parse::<N>()
        .map_err(|_| ParseRowError::InvalidInteger(field, value.to_string()))
}

/// Build the three event instants from times of day on `date`, then roll over and check.
fn event_interval(
    date: CatalogDate,
    start: TimeOfDay,
    peak: TimeOfDay,
    end: TimeOfDay,
) -> Result<(hifitime::Epoch, hifitime::Epoch, hifitime::Epoch), FlareCatError> {
    let start = date.at(start)?;
    let (peak, end) = roll_over(start, date.at(peak)?, date.at(end)?);
    check_ordering(start, peak, end)?;
    Ok((start, peak, end))
}

/// Normalize one HESSI row.
///
/// Arguments
/// -----------------
/// * `fields`: the row tokens without the date token:
///   `flare_id start peak end dur peak_rate total energy x y radial ar [flags...]`
/// * `date`: the row's date, default day of the three times
///
/// Return
/// ----------
/// * The [`LocationEvent`], or the reason the row must be skipped.
pub fn normalize_location(
    fields: &[&str],
    date: CatalogDate,
) -> Result<LocationEvent, FlareCatError> {
    if fields.len() < HESSI_MANDATORY_FIELDS {
        return Err(ParseRowError::WrongFieldCount {
            expected: HESSI_MANDATORY_FIELDS,
            found: fields.len(),
        }
        .into());
    }
    let (mandatory, flag_tokens) = fields.split_at(HESSI_MANDATORY_FIELDS);
    reject_missing(mandatory)?;

    let (start, peak, end) = event_interval(
        date,
        parse_hms(mandatory[1])?,
        parse_hms(mandatory[2])?,
        parse_hms(mandatory[3])?,
    )?;

    Ok(LocationEvent {
        flare_id: parse_int("flare_id", mandatory[0])?,
        start,
        peak,
        end,
        duration: parse_int("duration", mandatory[4])?,
        peak_rate: parse_int("peak_rate", mandatory[5])?,
        total_counts: parse_int("total_counts", mandatory[6])?,
        energy_band: mandatory[7].to_string(),
        x_pos: parse_int("x_pos", mandatory[8])?,
        y_pos: parse_int("y_pos", mandatory[9])?,
        radial: parse_int("radial", mandatory[10])?,
        active_region: parse_int("active_region", mandatory[11])?,
        flags: QualityFlags::from_tokens(flag_tokens),
    })
}

/// Normalize one GOES row.
///
/// Arguments
/// -----------------
/// * `fields`: `start end peak class [intensity ...]`, times as `HHMM`; a bare class letter
///   followed by an intensity of one to three digits (`C`, `11`) reads as `C1.1`, other
///   trailing fields are ignored
/// * `date`: the row's date, default day of the three times
///
/// Return
/// ----------
/// * The [`ClassificationEvent`], or the reason the row must be skipped.
pub fn normalize_classification(
    fields: &[&str],
    date: CatalogDate,
) -> Result<ClassificationEvent, FlareCatError> {
    if fields.len() < GOES_MANDATORY_FIELDS {
        return Err(ParseRowError::WrongFieldCount {
            expected: GOES_MANDATORY_FIELDS,
            found: fields.len(),
        }
        .into());
    }
    reject_missing(&fields[..GOES_MANDATORY_FIELDS])?;

    let (start, peak, end) = event_interval(
        date,
        parse_hhmm(fields[0])?,
        parse_hhmm(fields[2])?,
        parse_hhmm(fields[1])?,
    )?;

    let class_token = match fields.get(GOES_MANDATORY_FIELDS) {
        Some(intensity)
            if fields[3].len() == 1
                && (1..=GOES_MAX_INTENSITY_DIGITS).contains(&intensity.len())
                && intensity.chars().all(|c| c.is_ascii_digit()) =>
        {
            format!("{}{}", fields[3], intensity)
        }
        _ => fields[3].to_string(),
    };
    let class = FlareClass::from_str(&class_token)?;

    Ok(ClassificationEvent {
        start,
        end,
        peak,
        class,
    })
}

#[cfg(test)]
mod normalizer_test {
    use super::*;
    use crate::time::format_timestamp;

    const HESSI_FIELDS: [&str; 16] = [
        "2021213", "21:29:56", "21:33:38", "21:41:48", "712", "136", "167304", "12-25", "592",
        "-358", "692", "9811", "A0", "P1", "PE", "Q1",
    ];

    #[test]
    fn test_normalize_location() {
        let event = normalize_location(&HESSI_FIELDS, CatalogDate::new(2002, 2, 12)).unwrap();

        assert_eq!(event.flare_id, 2021213);
        assert_eq!(format_timestamp(&event.start), "2002-02-12 21:29:56");
        assert_eq!(format_timestamp(&event.peak), "2002-02-12 21:33:38");
        assert_eq!(format_timestamp(&event.end), "2002-02-12 21:41:48");
        assert_eq!(event.duration, 712);
        assert_eq!(event.peak_rate, 136);
        assert_eq!(event.total_counts, 167304);
        assert_eq!(event.energy_band, "12-25");
        assert_eq!((event.x_pos, event.y_pos, event.radial), (592, -358, 692));
        assert_eq!(event.active_region, 9811);
        assert_eq!(event.flags.as_str(), "A0-P1-PE-Q1");
    }

    #[test]
    fn test_normalize_location_without_flags() {
        let event =
            normalize_location(&HESSI_FIELDS[..12], CatalogDate::new(2002, 2, 12)).unwrap();
        assert!(event.flags.is_empty());
    }

    #[test]
    fn test_normalize_location_midnight() {
        let mut fields = HESSI_FIELDS;
        fields[1] = "23:58:00";
        fields[2] = "00:02:00";
        fields[3] = "00:20:00";

        let event = normalize_location(&fields, CatalogDate::new(2003, 10, 28)).unwrap();
        assert_eq!(format_timestamp(&event.start), "2003-10-28 23:58:00");
        assert_eq!(format_timestamp(&event.peak), "2003-10-29 00:02:00");
        assert_eq!(format_timestamp(&event.end), "2003-10-29 00:20:00");
    }

    #[test]
    fn test_normalize_location_errors() {
        let date = CatalogDate::new(2002, 2, 12);

        assert_eq!(
            normalize_location(&HESSI_FIELDS[..7], date),
            Err(FlareCatError::ParseError(ParseRowError::WrongFieldCount {
                expected: 12,
                found: 7
            }))
        );

        let mut fields = HESSI_FIELDS;
        fields[8] = "59x";
        assert_eq!(
            normalize_location(&fields, date),
            Err(FlareCatError::ParseError(ParseRowError::InvalidInteger(
                "x_pos",
                "59x".into()
            )))
        );

        let mut fields = HESSI_FIELDS;
        fields[2] = "21:3x:38";
        assert!(matches!(
            normalize_location(&fields, date),
            Err(FlareCatError::ParseError(ParseRowError::InvalidTime(_)))
        ));
    }

    #[test]
    fn test_normalize_location_missing_marker() {
        let mut fields = HESSI_FIELDS;
        fields[10] = "////";
        assert_eq!(
            normalize_location(&fields, CatalogDate::new(2002, 2, 12)),
            Err(FlareCatError::MissingValue("////".into()))
        );
    }

    #[test]
    fn test_normalize_location_integrity_violation() {
        let mut fields = HESSI_FIELDS;
        fields[1] = "23:58:00";
        fields[2] = "00:02:00";
        fields[3] = "23:59:00";
        assert!(matches!(
            normalize_location(&fields, CatalogDate::new(2002, 2, 12)),
            Err(FlareCatError::DataIntegrityViolation { .. })
        ));
    }

    #[test]
    fn test_normalize_classification() {
        let date = CatalogDate::new(2010, 6, 6);

        let event = normalize_classification(&["0100", "0110", "0105", "B"], date).unwrap();
        assert_eq!(format_timestamp(&event.start), "2010-06-06 01:00:00");
        assert_eq!(format_timestamp(&event.end), "2010-06-06 01:10:00");
        assert_eq!(format_timestamp(&event.peak), "2010-06-06 01:05:00");
        assert_eq!(event.class, FlareClass::new('B', None));

        let event = normalize_classification(&["2350", "0015", "0002", "C", "11"], date).unwrap();
        assert_eq!(format_timestamp(&event.end), "2010-06-07 00:15:00");
        assert_eq!(format_timestamp(&event.peak), "2010-06-07 00:02:00");
        assert_eq!(event.class.to_string(), "C1.1");

        let event = normalize_classification(&["0100", "0110", "0105", "M2.5"], date).unwrap();
        assert_eq!(event.class, FlareClass::new('M', Some(2.5)));
    }

    #[test]
    fn test_normalize_classification_region_without_intensity() {
        let date = CatalogDate::new(2003, 10, 28);

        // blank intensity, the next token is the region number
        let event = normalize_classification(&["0951", "1124", "1110", "B", "9830"], date).unwrap();
        assert_eq!(event.class, FlareClass::new('B', None));

        let event = normalize_classification(&["0951", "1124", "1110", "X", "171"], date).unwrap();
        assert_eq!(event.class.to_string(), "X17.1");
    }

    #[test]
    fn test_normalize_classification_errors() {
        let date = CatalogDate::new(2011, 3, 1);

        assert_eq!(
            normalize_classification(&["0100", "0110", "////", "C"], date),
            Err(FlareCatError::MissingValue("////".into()))
        );
        assert!(matches!(
            normalize_classification(&["0100", "0110"], date),
            Err(FlareCatError::ParseError(
                ParseRowError::WrongFieldCount { .. }
            ))
        ));
        assert!(matches!(
            normalize_classification(&["0100", "0110", "0105", "c"], date),
            Err(FlareCatError::ParseError(ParseRowError::InvalidClass(_)))
        ));
    }
}
