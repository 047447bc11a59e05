//! # HESSI flare list reader
//!
//! The flare list is a whitespace-separated text table surrounded by free-form header
//! and footer text. A **data row** is any line whose first token is made only of digits
//! (the flare number); every other line is ignored.
//!
//! Row layout
//! -----------------
//! ```text
//! flare  date         start    peak     end      dur  peak_c/s total   energy x    y     radial AR   flags...
//! 2021213 12-Feb-2002 21:29:56 21:33:38 21:41:48 712  136      167304  12-25  592  -358  692    9811 A0 P1 PE Q1
//! ```
//!
//! The date token is removed from the row and used as the default day of the three
//! times; the remaining tokens go to [`normalize_location`].
use crate::events::LocationEvent;
use crate::flarecat_errors::{FlareCatError, ParseRowError};
use crate::time::parse_hessi_date;

use super::{normalize_location, read_catalog, HessiCatalog};

/// Fields of a data row including the date token.
const HESSI_ROW_FIELDS: usize = crate::constants::HESSI_MANDATORY_FIELDS + 1;

/// Parse one line of the flare list.
///
/// Return
/// ----------
/// * `Ok(None)` if the line is not a data row,
/// * `Ok(Some(event))` for a valid row,
/// * `Err(FlareCatError)` if the row must be skipped.
pub fn parse_hessi_line(line: &str) -> Result<Option<LocationEvent>, FlareCatError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let is_data_row = tokens
        .first()
        .is_some_and(|id| id.chars().all(|c| c.is_ascii_digit()));
    if !is_data_row {
        return Ok(None);
    }

    if tokens.len() < 2 {
        return Err(ParseRowError::WrongFieldCount {
            expected: HESSI_ROW_FIELDS,
            found: tokens.len(),
        }
        .into());
    }

    let date = parse_hessi_date(tokens[1])?;
    let fields: Vec<&str> = std::iter::once(tokens[0])
        .chain(tokens[2..].iter().copied())
        .collect();

    normalize_location(&fields, date).map(Some)
}

/// Read a whole HESSI flare list.
///
/// Arguments
/// -----------------
/// * `text`: content of the flare list
/// * `source`: label used to report skipped rows (file name, URL, ...)
pub fn read_hessi(text: &str, source: &str) -> HessiCatalog {
    read_catalog(text, source, parse_hessi_line)
}

#[cfg(test)]
mod hessi_reader_test {
    use super::*;
    use crate::time::format_timestamp;

    const SAMPLE: &str = "\
HESSI Flare List
Flare     Start       Peak     End      Dur  Peak Total   Energy  X Pos  Y Pos  Radial AR  Flags
                                        s    c/s  Counts  keV     asec   asec   asec
 2021213  12-Feb-2002 21:29:56 21:33:38 21:41:48   712   136     167304   12-25    592   -358    692 9811 A0 P1 PE Q1
 2021228  12-Feb-2002 23:58:12 00:01:02 00:09:40   688    24      23664    6-12   -720    -96    726    0 A0 P1
 2021332  13-Feb-2002 12:03:x1 12:07:30 12:10:50   228    60      13412    6-12    -38   -271    273 9825 A0 P1 Q1
 2021333  13-Feb-2002 12:13:08 12:15:30
Notes: flags are documented at the end of the file.
";

    #[test]
    fn test_parse_hessi_line() {
        let line =
            " 2021213  12-Feb-2002 21:29:56 21:33:38 21:41:48   712   136     167304   12-25    592   -358    692 9811 A0 P1 PE Q1";
        let event = parse_hessi_line(line).unwrap().unwrap();
        assert_eq!(event.flare_id, 2021213);
        assert_eq!(format_timestamp(&event.peak), "2002-02-12 21:33:38");
        assert!(event.flags.contains("PE"));
    }

    #[test]
    fn test_non_data_lines() {
        assert_eq!(parse_hessi_line(""), Ok(None));
        assert_eq!(parse_hessi_line("Flare Start Peak End"), Ok(None));
        assert_eq!(parse_hessi_line("    s    c/s  Counts"), Ok(None));
    }

    #[test]
    fn test_read_hessi() {
        let load = read_hessi(SAMPLE, "sample");

        assert_eq!(load.len(), 2);
        assert_eq!(load.skipped.len(), 2);
        assert_eq!(load.parse_errors(), 2);
        assert_eq!(load.missing_rows(), 0);

        let rolled = &load.events[1];
        assert_eq!(format_timestamp(&rolled.start), "2002-02-12 23:58:12");
        assert_eq!(format_timestamp(&rolled.peak), "2002-02-13 00:01:02");
        assert_eq!(format_timestamp(&rolled.end), "2002-02-13 00:09:40");
        assert!(rolled.flags.contains("P1"));

        assert_eq!(load.skipped[0].source, "sample");
        assert_eq!(load.skipped[0].line, 6);
        assert_eq!(load.skipped[1].line, 7);
        assert!(matches!(
            load.skipped[1].reason,
            FlareCatError::ParseError(ParseRowError::WrongFieldCount { found: 3, .. })
        ));
    }
}
