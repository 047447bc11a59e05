//! # Join pipeline
//!
//! [`FlareCat`] wires the stages together:
//!
//! ```text
//! HESSI source ── load_hessi ── QualityFilter ─┐
//! GOES sources ── load_goes ──────────────────-┴── match_flares ── JoinedFlares
//! ```
//!
//! The whole pipeline is synchronous and in memory. Row errors never stop it; they are
//! counted in the [`JoinReport`]. Only source errors (unreadable file, HTTP failure,
//! download disabled) are returned as `Err`.
//!
//! ## Example
//! -----------------
//! ```rust,no_run
//! use flarecat::{CatalogSource, FlareCat, GoesArchive, JoinParams};
//!
//! # fn demo() -> Result<(), flarecat::FlareCatError> {
//! let flarecat = FlareCat::new(JoinParams::default())?;
//! let report = flarecat.run(
//!     &CatalogSource::file("hessi_flare_list.txt"),
//!     &GoesArchive::default().sources(2002..=2017),
//! )?;
//! println!("{report:#}");
//! report.joined.to_csv_path(camino::Utf8Path::new("hessi_goes_flare_data.csv"))?;
//! # Ok(())
//! # }
//! ```
use std::fmt;

use log::info;

use crate::assembler::JoinedFlares;
use crate::catalog_source::CatalogSource;
use crate::events::{ClassificationEvent, LocationEvent};
use crate::flarecat_errors::FlareCatError;
use crate::imaging::{plan_image_requests, ImageRequest};
use crate::interval_matcher::match_flares;
use crate::normalizer::catalog_file::CatalogFile;
use crate::normalizer::{CatalogLoad, GoesCatalog, HessiCatalog};
use crate::params::JoinParams;
use crate::quality_filter::{FilterReport, QualityFilter};

/// Row counts of a catalog load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub events: usize,
    pub parse_errors: usize,
    pub missing: usize,
    pub integrity: usize,
}

impl LoadSummary {
    pub fn of<T>(load: &CatalogLoad<T>) -> Self {
        LoadSummary {
            events: load.len(),
            parse_errors: load.parse_errors(),
            missing: load.missing_rows(),
            integrity: load.integrity_violations(),
        }
    }

    pub fn skipped(&self) -> usize {
        self.parse_errors + self.missing + self.integrity
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} skipped (parse={}, missing={}, integrity={})",
            self.events,
            self.skipped(),
            self.parse_errors,
            self.missing,
            self.integrity
        )
    }
}

/// Everything a join produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinReport {
    pub hessi: LoadSummary,
    pub goes: LoadSummary,
    pub filter: FilterReport,
    /// Indices of the classification events with no location peak in their window.
    pub unmatched: Vec<usize>,
    /// Indices of the classification events with several location peaks in their window.
    pub ambiguous: Vec<usize>,
    pub joined: JoinedFlares,
}

impl fmt::Display for JoinReport {
    /// Compact by default; multi-line when using the alternate flag (`{:#}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "HESSI/GOES join summary")?;
            writeln!(f, "-----------------------")?;
            writeln!(f, "HESSI     : {}", self.hessi)?;
            writeln!(f, "GOES      : {}", self.goes)?;
            writeln!(f, "filter    : {}", self.filter)?;
            writeln!(f, "unmatched : {}", self.unmatched.len())?;
            writeln!(f, "ambiguous : {}", self.ambiguous.len())?;
            writeln!(f, "joined    : {}", self.joined.len())?;
            write!(f, "classes   : {}", self.joined.counts())
        } else {
            write!(
                f,
                "joined={}, unmatched={}, ambiguous={}, hessi_kept={}/{}, goes={}",
                self.joined.len(),
                self.unmatched.len(),
                self.ambiguous.len(),
                self.filter.kept,
                self.filter.input,
                self.goes.events
            )
        }
    }
}

/// The HESSI/GOES join.
#[derive(Debug, Clone)]
pub struct FlareCat {
    params: JoinParams,
    filter: QualityFilter,
}

impl FlareCat {
    /// Return
    /// ----------
    /// * `Err(FlareCatError::InvalidParameter)` if the quality filter settings are invalid.
    pub fn new(params: JoinParams) -> Result<Self, FlareCatError> {
        let filter = params.quality_filter()?;
        Ok(FlareCat { params, filter })
    }

    pub fn params(&self) -> &JoinParams {
        &self.params
    }

    pub fn load_hessi(&self, source: &CatalogSource) -> Result<HessiCatalog, FlareCatError> {
        HessiCatalog::new_from_source(source)
    }

    /// Load and concatenate the GOES reports, in the order of `sources`.
    pub fn load_goes(&self, sources: &[CatalogSource]) -> Result<GoesCatalog, FlareCatError> {
        GoesCatalog::new_from_sources(sources)
    }

    /// Filter the location catalog, match and assemble.
    ///
    /// The radial cut is calibrated once on `location`.
    ///
    /// The load summaries of the returned report are left empty; [`run`](Self::run)
    /// fills them.
    pub fn join(
        &self,
        location: &[LocationEvent],
        classification: &[ClassificationEvent],
    ) -> JoinReport {
        let (filtered, filter) = self.filter.calibrate(location).apply_with_report(location);
        let outcome = match_flares(&filtered, classification);

        JoinReport {
            filter,
            unmatched: outcome.unmatched,
            ambiguous: outcome.ambiguous,
            joined: JoinedFlares::assemble(outcome.matched),
            ..JoinReport::default()
        }
    }

    /// Load both catalogs and join them.
    pub fn run(
        &self,
        hessi: &CatalogSource,
        goes: &[CatalogSource],
    ) -> Result<JoinReport, FlareCatError> {
        let location = self.load_hessi(hessi)?;
        let classification = self.load_goes(goes)?;

        let report = JoinReport {
            hessi: LoadSummary::of(&location),
            goes: LoadSummary::of(&classification),
            ..self.join(&location.events, &classification.events)
        };
        info!("Join done: {report}");
        Ok(report)
    }

    /// Image requests for the joined flares of `report`.
    pub fn image_requests(&self, report: &JoinReport) -> Vec<ImageRequest> {
        plan_image_requests(report.joined.flares(), &self.params.imaging)
    }
}
