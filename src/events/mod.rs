//! # Catalog events
//!
//! Typed records produced by the normalizer:
//!
//! * [`LocationEvent`] – one row of the HESSI flare list (timing, counts, position, flags).
//! * [`ClassificationEvent`] – one row of a GOES XRS report (timing and [`FlareClass`]).
//! * [`QualityFlags`] – the HESSI flag tokens of a row, stored joined with
//!   [`FLAG_SEPARATOR`](crate::constants::FLAG_SEPARATOR).
//!
//! Both event kinds satisfy `start <= peak <= end`; the normalizer never builds one
//! that does not.
use std::fmt;

use hifitime::Epoch;
use itertools::Itertools;

use crate::constants::{ArcSec, FlareId, Seconds, FLAG_SEPARATOR};
use crate::flarecat_errors::ParseRowError;
use crate::time::format_timestamp;

pub mod flags;

/// Flag codes of a HESSI row, kept as a single `-`-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityFlags(String);

impl QualityFlags {
    /// Join the trailing flag tokens of a row. No token gives an empty set.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let separator = FLAG_SEPARATOR.to_string();
        QualityFlags(
            tokens
                .iter()
                .map(|t| t.as_ref())
                .filter(|t| !t.is_empty())
                .join(&separator),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the individual flag codes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.split(FLAG_SEPARATOR).filter(|f| !f.is_empty())
    }

    /// Does the event carry `flag` anywhere in its flag set?
    pub fn contains(&self, flag: &str) -> bool {
        self.iter().any(|f| f == flag)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Display for QualityFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A flare from the HESSI flare list.
///
/// # Fields
///
/// * `flare_id` - HESSI flare number
/// * `start`, `peak`, `end` - event timing, rolled over midnight when needed
/// * `duration` - event duration in seconds as given by the catalog
/// * `peak_rate` - peak count rate (counts/s)
/// * `total_counts` - total counts over the event
/// * `energy_band` - energy band of the peak (keV), e.g. `12-25`
/// * `x_pos`, `y_pos` - position on the disk (arcsec)
/// * `radial` - distance from the disk center (arcsec)
/// * `active_region` - NOAA active region, `<= 0` means unknown
/// * `flags` - quality/state flags
#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvent {
    pub flare_id: FlareId,
    pub start: Epoch,
    pub peak: Epoch,
    pub end: Epoch,
    pub duration: Seconds,
    pub peak_rate: u32,
    pub total_counts: u64,
    pub energy_band: String,
    pub x_pos: ArcSec,
    pub y_pos: ArcSec,
    pub radial: ArcSec,
    pub active_region: i32,
    pub flags: QualityFlags,
}

/// GOES X-ray class: a letter (`A`, `B`, `C`, `M`, `X`) and an optional sub-level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlareClass {
    pub letter: char,
    pub sub_level: Option<f32>,
}

impl FlareClass {
    pub fn new(letter: char, sub_level: Option<f32>) -> Self {
        FlareClass { letter, sub_level }
    }
}

impl fmt::Display for FlareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_level {
            Some(level) => write!(f, "{}{:.1}", self.letter, level),
            None => write!(f, "{}", self.letter),
        }
    }
}

impl std::str::FromStr for FlareClass {
    type Err = ParseRowError;

    /// Parse `C`, `C1.1` or `C11` (two bare digits are tenths, as in the GOES reports).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRowError::InvalidClass(s.to_string());

        let mut chars = s.trim().chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }

        let rest = chars.as_str();
        if rest.is_empty() {
            return Ok(FlareClass::new(letter, None));
        }

        let level = if rest.contains('.') {
            rest.parse::<f32>().map_err(|_| invalid())?
        } else {
            rest.parse::<u32>().map_err(|_| invalid())? as f32 / 10.0
        };
        Ok(FlareClass::new(letter, Some(level)))
    }
}

/// A flare from a GOES XRS report.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationEvent {
    pub start: Epoch,
    pub end: Epoch,
    pub peak: Epoch,
    pub class: FlareClass,
}

impl ClassificationEvent {
    /// Is `t` inside the `[start, end]` window (both ends included)?
    #[inline]
    pub fn window_contains(&self, t: Epoch) -> bool {
        self.start <= t && t <= self.end
    }
}

impl fmt::Display for ClassificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} → {}] peak {}",
            self.class,
            format_timestamp(&self.start),
            format_timestamp(&self.end),
            format_timestamp(&self.peak)
        )
    }
}
