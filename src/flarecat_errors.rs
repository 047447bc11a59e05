use thiserror::Error;

/// Row-level decoding failures for catalog lines.
///
/// Variants
/// -----------------
/// * `WrongFieldCount` – The row does not carry the mandatory number of fields.
/// * `InvalidInteger` – A numeric field holds non-numeric content; payload is `(field, value)`.
/// * `InvalidDate` – The calendar date of the row cannot be decoded.
/// * `InvalidTime` – A time-of-day field cannot be decoded.
/// * `InvalidClass` – The GOES class letter / sub-level cannot be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRowError {
    #[error("Expected at least {expected} fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },
    #[error("Invalid integer in field {0}: {1}")]
    InvalidInteger(&'static str, String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
    #[error("Invalid flare class: {0}")]
    InvalidClass(String),
}

#[derive(Error, Debug)]
pub enum FlareCatError {
    #[error("Error during the catalog row parsing: {0}")]
    ParseError(ParseRowError),

    #[error("Row holds a missing-value marker: {0}")]
    MissingValue(String),

    #[error("Event interval is still inverted after rollover: start={start}, peak={peak}, end={end}")]
    DataIntegrityViolation {
        start: String,
        peak: String,
        end: String,
    },

    #[error("Invalid join parameter: {0}")]
    InvalidParameter(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Remote catalog requested but the download feature is disabled: {0}")]
    DownloadDisabled(String),

    #[cfg(feature = "download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl From<ParseRowError> for FlareCatError {
    fn from(err: ParseRowError) -> Self {
        FlareCatError::ParseError(err)
    }
}

impl FlareCatError {
    /// Short, stable name of the variant, used to bucket skipped rows.
    pub fn kind(&self) -> &'static str {
        use FlareCatError::*;
        match self {
            ParseError(_) => "parse",
            MissingValue(_) => "missing",
            DataIntegrityViolation { .. } => "integrity",
            InvalidParameter(_) => "parameter",
            IoError(_) => "io",
            CsvError(_) => "csv",
            Utf8PathError(_) => "path",
            DownloadDisabled(_) => "download",
            #[cfg(feature = "download")]
            ReqwestError(_) => "http",
        }
    }
}

impl PartialEq for FlareCatError {
    fn eq(&self, other: &Self) -> bool {
        use FlareCatError::*;
        match (self, other) {
            (ParseError(a), ParseError(b)) => a == b,
            (MissingValue(a), MissingValue(b)) => a == b,
            (
                DataIntegrityViolation {
                    start: s1,
                    peak: p1,
                    end: e1,
                },
                DataIntegrityViolation {
                    start: s2,
                    peak: p2,
                    end: e2,
                },
            ) => s1 == s2 && p1 == p2 && e1 == e2,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (DownloadDisabled(a), DownloadDisabled(b)) => a == b,

            // not comparable, same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            #[cfg(feature = "download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            _ => false,
        }
    }
}
