//! # Joined-record assembler
//!
//! Collects the matched flares into [`JoinedFlares`], counts them per class letter and
//! exchanges them as CSV:
//!
//! ```text
//! Peak_time,X_pos,Y_pos,Class
//! 2011-02-15 01:56:10,200,-221,X2.2
//! ```
//!
//! Rows keep the order of the matches. `Peak_time` is written as `YYYY-MM-DD HH:MM:SS`.
use std::collections::BTreeMap;
use std::fmt;
use std::io;

use camino::Utf8Path;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

use crate::constants::ArcSec;
use crate::flarecat_errors::FlareCatError;
use crate::interval_matcher::MatchedFlare;
use crate::time::{format_timestamp, parse_timestamp};

/// Number of joined flares per class letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCounts(BTreeMap<char, usize>);

impl ClassCounts {
    pub fn from_flares(flares: &[MatchedFlare]) -> Self {
        let counts = flares.iter().map(|f| f.class.letter).counts();
        ClassCounts(counts.into_iter().collect())
    }

    /// Count of `letter`, zero if absent.
    pub fn get(&self, letter: char) -> usize {
        self.0.get(&letter).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// `(letter, count)` pairs in letter order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.0.iter().map(|(letter, count)| (*letter, *count))
    }

    pub fn as_map(&self) -> &BTreeMap<char, usize> {
        &self.0
    }
}

impl fmt::Display for ClassCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .map(|(letter, count)| format!("{letter}={count}"))
                .join(", ")
        )
    }
}

/// One row of the joined CSV dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FlareRecord {
    #[serde(rename = "Peak_time")]
    peak_time: String,
    #[serde(rename = "X_pos")]
    x_pos: ArcSec,
    #[serde(rename = "Y_pos")]
    y_pos: ArcSec,
    #[serde(rename = "Class")]
    class: String,
}

impl From<&MatchedFlare> for FlareRecord {
    fn from(flare: &MatchedFlare) -> Self {
        FlareRecord {
            peak_time: format_timestamp(&flare.peak_time),
            x_pos: flare.x_pos,
            y_pos: flare.y_pos,
            class: flare.class.to_string(),
        }
    }
}

impl TryFrom<FlareRecord> for MatchedFlare {
    type Error = FlareCatError;

    fn try_from(record: FlareRecord) -> Result<Self, Self::Error> {
        Ok(MatchedFlare {
            peak_time: parse_timestamp(&record.peak_time)?,
            x_pos: record.x_pos,
            y_pos: record.y_pos,
            class: record.class.parse()?,
        })
    }
}

/// The joined dataset: matched flares and their per-class counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedFlares {
    flares: Vec<MatchedFlare>,
    counts: ClassCounts,
}

impl JoinedFlares {
    /// Take ownership of the matches, in their order.
    pub fn assemble(matches: Vec<MatchedFlare>) -> Self {
        let counts = ClassCounts::from_flares(&matches);
        info!("Joined {} flares ({counts})", matches.len());
        JoinedFlares {
            flares: matches,
            counts,
        }
    }

    pub fn flares(&self) -> &[MatchedFlare] {
        &self.flares
    }

    pub fn counts(&self) -> &ClassCounts {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.flares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flares.is_empty()
    }

    pub fn into_flares(self) -> Vec<MatchedFlare> {
        self.flares
    }

    /// Write the dataset as CSV, header first.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), FlareCatError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for flare in &self.flares {
            wtr.serialize(FlareRecord::from(flare))?;
        }
        if self.flares.is_empty() {
            wtr.write_record(["Peak_time", "X_pos", "Y_pos", "Class"])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the dataset to a CSV file, replacing any existing one.
    pub fn to_csv_path(&self, path: &Utf8Path) -> Result<(), FlareCatError> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))?;
        info!("Wrote {} flares to {path}", self.len());
        Ok(())
    }

    /// Read a dataset written by [`write_csv`](Self::write_csv).
    ///
    /// Return
    /// ----------
    /// * The dataset, or the first CSV, timestamp or class error met.
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self, FlareCatError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let flares = rdr
            .deserialize::<FlareRecord>()
            .map(|record| MatchedFlare::try_from(record?))
            .collect::<Result<Vec<_>, FlareCatError>>()?;
        Ok(JoinedFlares::assemble(flares))
    }

    pub fn from_csv_path(path: &Utf8Path) -> Result<Self, FlareCatError> {
        let file = std::fs::File::open(path)?;
        Self::read_csv(io::BufReader::new(file))
    }
}
