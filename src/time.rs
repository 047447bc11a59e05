//! # Catalog timestamps
//!
//! Both catalogs give **naive civil times**: a calendar date for the row and a
//! time of day for each of start, peak and end. This module turns them into
//! [`hifitime::Epoch`] values and implements the single-midnight rollover.
//!
//! Epochs are built on the **TAI** scale. Catalog times carry no time zone and no
//! leap-second information, so a uniform scale keeps `t + 1 day` equal to the same
//! wall-clock time on the next calendar day, including across the leap seconds
//! inserted during the catalog years.
//!
//! Formats
//! -----------------
//! * HESSI date: `dd-Mon-yyyy` (e.g. `12-Feb-2002`), time: `HH:MM:SS`.
//! * GOES date: `YYMMDD` (`YY < 70` → 20YY), time: `HHMM`, left-padded to four digits.
//! * Output: `YYYY-MM-DD HH:MM:SS`.
use hifitime::{Duration, Epoch, Unit};

use crate::flarecat_errors::{FlareCatError, ParseRowError};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Calendar day used as the default date of every time in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// Time of day as printed in the catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CatalogDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        CatalogDate { year, month, day }
    }

    /// Combine the date with a time of day into an epoch.
    ///
    /// Arguments
    /// -----------------
    /// * `time`: the time of day on this date
    ///
    /// Return
    /// ----------
    /// * The epoch, or [`ParseRowError::InvalidDate`] when the calendar date or the
    ///   time of day does not exist (e.g. 30 February, 25:00).
    pub fn at(&self, time: TimeOfDay) -> Result<Epoch, ParseRowError> {
        Epoch::maybe_from_gregorian_tai(
            self.year,
            self.month,
            self.day,
            time.hour,
            time.minute,
            time.second,
            0,
        )
        .map_err(|_| {
            ParseRowError::InvalidDate(format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                self.year, self.month, self.day, time.hour, time.minute, time.second
            ))
        })
    }
}

impl TimeOfDay {
    pub fn hms(hour: u8, minute: u8, second: u8) -> Self {
        TimeOfDay {
            hour,
            minute,
            second,
        }
    }
}

fn parse_u8(value: &str, raw: &str) -> Result<u8, ParseRowError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseRowError::InvalidTime(raw.to_string()));
    }
    value
        .parse::<u8>()
        .map_err(|_| ParseRowError::InvalidTime(raw.to_string()))
}

/// Parse a HESSI date such as `12-Feb-2002` (month name is case-insensitive).
pub fn parse_hessi_date(raw: &str) -> Result<CatalogDate, ParseRowError> {
    let invalid = || ParseRowError::InvalidDate(raw.to_string());

    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let day = parts[0].parse::<u8>().map_err(|_| invalid())?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(parts[1]))
        .ok_or_else(invalid)? as u8
        + 1;
    let year = parts[2].parse::<i32>().map_err(|_| invalid())?;

    Ok(CatalogDate::new(year, month, day))
}

/// Parse a GOES `YYMMDD` date.
pub fn parse_goes_date(raw: &str) -> Result<CatalogDate, ParseRowError> {
    let invalid = || ParseRowError::InvalidDate(raw.to_string());

    if raw.len() != 6 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let yy = raw[0..2].parse::<i32>().map_err(|_| invalid())?;
    let month = raw[2..4].parse::<u8>().map_err(|_| invalid())?;
    let day = raw[4..6].parse::<u8>().map_err(|_| invalid())?;
    let year = if yy < 70 { 2000 + yy } else { 1900 + yy };

    Ok(CatalogDate::new(year, month, day))
}

/// Parse a `HH:MM:SS` time of day.
pub fn parse_hms(raw: &str) -> Result<TimeOfDay, ParseRowError> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 3 {
        return Err(ParseRowError::InvalidTime(raw.to_string()));
    }
    Ok(TimeOfDay::hms(
        parse_u8(parts[0], raw)?,
        parse_u8(parts[1], raw)?,
        parse_u8(parts[2], raw)?,
    ))
}

/// Parse a GOES `HHMM` time of day. Shorter values are left-padded with zeros
/// (`52` → `00:52`), a trailing `.0` is ignored.
pub fn parse_hhmm(raw: &str) -> Result<TimeOfDay, ParseRowError> {
    let digits = raw.split('.').next().unwrap_or_default();
    if digits.is_empty() || digits.len() > 4 {
        return Err(ParseRowError::InvalidTime(raw.to_string()));
    }
    let padded = format!("{digits:0>4}");
    Ok(TimeOfDay::hms(
        parse_u8(&padded[0..2], raw)?,
        parse_u8(&padded[2..4], raw)?,
        0,
    ))
}

/// One calendar day.
#[inline]
pub fn one_day() -> Duration {
    Unit::Day * 1_i64
}

/// Correct a single midnight crossing.
///
/// `peak` and `end` are each compared to `start` independently; an instant strictly
/// before `start` is moved one day forward. At most one day is ever added.
///
/// Return
/// ----------
/// * `(peak, end)` after correction.
pub fn roll_over(start: Epoch, peak: Epoch, end: Epoch) -> (Epoch, Epoch) {
    let peak = if peak < start { peak + one_day() } else { peak };
    let end = if end < start { end + one_day() } else { end };
    (peak, end)
}

/// Verify `start <= peak <= end`.
///
/// Return
/// ----------
/// * `Err(FlareCatError::DataIntegrityViolation)` if the ordering does not hold.
pub fn check_ordering(start: Epoch, peak: Epoch, end: Epoch) -> Result<(), FlareCatError> {
    if start <= peak && peak <= end {
        Ok(())
    } else {
        Err(FlareCatError::DataIntegrityViolation {
            start: format_timestamp(&start),
            peak: format_timestamp(&peak),
            end: format_timestamp(&end),
        })
    }
}

/// Render an epoch as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(epoch: &Epoch) -> String {
    let (y, m, d, hh, mm, ss, _) = epoch.to_gregorian_tai();
    format!("{y:04}-{m:02}-{d:02} {hh:02}:{mm:02}:{ss:02}")
}

/// Render an epoch as `YYYY_MM_DD_HH_MM_SS`, suitable for file names.
pub fn format_file_stem(epoch: &Epoch) -> String {
    let (y, m, d, hh, mm, ss, _) = epoch.to_gregorian_tai();
    format!("{y:04}_{m:02}_{d:02}_{hh:02}_{mm:02}_{ss:02}")
}

/// Parse `YYYY-MM-DD HH:MM:SS` back into an epoch.
pub fn parse_timestamp(raw: &str) -> Result<Epoch, ParseRowError> {
    let invalid = || ParseRowError::InvalidDate(raw.to_string());

    let (date, time) = raw.trim().split_once(' ').ok_or_else(invalid)?;
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let date = CatalogDate::new(
        parts[0].parse().map_err(|_| invalid())?,
        parts[1].parse().map_err(|_| invalid())?,
        parts[2].parse().map_err(|_| invalid())?,
    );
    date.at(parse_hms(time.trim())?)
}

#[cfg(test)]
mod time_test {
    use super::*;

    fn epoch(raw: &str) -> Epoch {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn test_parse_hessi_date() {
        assert_eq!(
            parse_hessi_date("12-Feb-2002").unwrap(),
            CatalogDate::new(2002, 2, 12)
        );
        assert_eq!(
            parse_hessi_date("01-DEC-2010").unwrap(),
            CatalogDate::new(2010, 12, 1)
        );
        assert!(matches!(
            parse_hessi_date("12-Foo-2002"),
            Err(ParseRowError::InvalidDate(_))
        ));
        assert!(parse_hessi_date("2002-02-12-1").is_err());
    }

    #[test]
    fn test_parse_goes_date() {
        assert_eq!(
            parse_goes_date("100606").unwrap(),
            CatalogDate::new(2010, 6, 6)
        );
        assert_eq!(
            parse_goes_date("790131").unwrap(),
            CatalogDate::new(1979, 1, 31)
        );
        assert!(parse_goes_date("10066").is_err());
        assert!(parse_goes_date("10a606").is_err());
    }

    #[test]
    fn test_parse_times() {
        assert_eq!(parse_hms("21:29:56").unwrap(), TimeOfDay::hms(21, 29, 56));
        assert!(parse_hms("21:29").is_err());
        assert!(parse_hms("ab:29:56").is_err());

        assert_eq!(parse_hhmm("0052").unwrap(), TimeOfDay::hms(0, 52, 0));
        assert_eq!(parse_hhmm("52").unwrap(), TimeOfDay::hms(0, 52, 0));
        assert_eq!(parse_hhmm("5.0").unwrap(), TimeOfDay::hms(0, 5, 0));
        assert_eq!(parse_hhmm("2359").unwrap(), TimeOfDay::hms(23, 59, 0));
        assert!(parse_hhmm("////").is_err());
        assert!(parse_hhmm("12345").is_err());
    }

    #[test]
    fn test_invalid_calendar_time() {
        let date = CatalogDate::new(2010, 2, 30);
        assert!(date.at(TimeOfDay::hms(1, 0, 0)).is_err());

        let date = CatalogDate::new(2010, 2, 3);
        assert!(date.at(TimeOfDay::hms(25, 0, 0)).is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let t = CatalogDate::new(2010, 6, 6)
            .at(TimeOfDay::hms(1, 5, 0))
            .unwrap();
        assert_eq!(format_timestamp(&t), "2010-06-06 01:05:00");
        assert_eq!(format_file_stem(&t), "2010_06_06_01_05_00");
        assert_eq!(epoch("2010-06-06 01:05:00"), t);
        assert!(parse_timestamp("2010-06-06T01:05:00").is_err());
    }

    #[test]
    fn test_roll_over_midnight() {
        let start = epoch("2004-03-10 23:58:00");
        let peak = epoch("2004-03-10 00:02:00");
        let end = epoch("2004-03-10 00:10:00");

        let (peak, end) = roll_over(start, peak, end);
        assert_eq!(format_timestamp(&peak), "2004-03-11 00:02:00");
        assert_eq!(format_timestamp(&end), "2004-03-11 00:10:00");
        assert!(check_ordering(start, peak, end).is_ok());
    }

    #[test]
    fn test_roll_over_only_end() {
        let start = epoch("2004-03-10 23:50:00");
        let peak = epoch("2004-03-10 23:55:00");
        let end = epoch("2004-03-10 00:05:00");

        let (peak, end) = roll_over(start, peak, end);
        assert_eq!(format_timestamp(&peak), "2004-03-10 23:55:00");
        assert_eq!(format_timestamp(&end), "2004-03-11 00:05:00");
    }

    #[test]
    fn test_roll_over_across_leap_second() {
        // 2008-12-31 ends with a leap second in UTC
        let start = epoch("2008-12-31 23:59:00");
        let peak = epoch("2008-12-31 00:01:00");
        let (peak, _) = roll_over(start, peak, start);
        assert_eq!(format_timestamp(&peak), "2009-01-01 00:01:00");
    }

    #[test]
    fn test_roll_over_grid() {
        // (start, peak, end) triples on one nominal date, sampled every 97 minutes
        let date = CatalogDate::new(2012, 6, 30);
        let minutes: Vec<u32> = (0..24 * 60).step_by(97).collect();
        for &s in &minutes {
            for &p in &minutes {
                for &e in &minutes {
                    let at = |m: u32| {
                        date.at(TimeOfDay::hms((m / 60) as u8, (m % 60) as u8, 0))
                            .unwrap()
                    };
                    let (start, peak, end) = (at(s), at(p), at(e));
                    let (new_peak, new_end) = roll_over(start, peak, end);

                    let expected_peak = if p < s { peak + one_day() } else { peak };
                    let expected_end = if e < s { end + one_day() } else { end };
                    assert_eq!(new_peak, expected_peak);
                    assert_eq!(new_end, expected_end);
                    assert!(start <= new_peak && start <= new_end);
                }
            }
        }
    }

    #[test]
    fn test_check_ordering_violation() {
        // peak rolled to the next day but the end did not need to roll
        let start = epoch("2004-03-10 23:58:00");
        let peak = epoch("2004-03-11 00:02:00");
        let end = epoch("2004-03-10 23:59:00");

        assert_eq!(
            check_ordering(start, peak, end),
            Err(FlareCatError::DataIntegrityViolation {
                start: "2004-03-10 23:58:00".into(),
                peak: "2004-03-11 00:02:00".into(),
                end: "2004-03-10 23:59:00".into(),
            })
        );
    }
}
