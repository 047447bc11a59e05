//! # flarecat
//!
//! Joins the HESSI flare list (flare positions) with the GOES XRS event reports (flare
//! classes). A GOES event is given the position of the single HESSI flare peaking inside
//! its `[start, end]` window; events with no such flare or with several are dropped.
//!
//! See [`pipeline::FlareCat`] for the end-to-end entry point.
pub mod assembler;
pub mod catalog_source;
pub mod constants;
pub mod events;
pub mod flarecat_errors;
pub mod imaging;
pub mod interval_matcher;
pub mod normalizer;
pub mod params;
pub mod pipeline;
pub mod quality_filter;
pub mod time;

pub use assembler::{ClassCounts, JoinedFlares};
pub use catalog_source::CatalogSource;
pub use events::{ClassificationEvent, FlareClass, LocationEvent, QualityFlags};
pub use flarecat_errors::FlareCatError;
pub use interval_matcher::{match_flares, MatchOutcome, MatchedFlare};
pub use normalizer::catalog_file::CatalogFile;
pub use normalizer::goes_reader::GoesArchive;
pub use normalizer::{GoesCatalog, HessiCatalog};
pub use params::{ImagingParams, JoinParams};
pub use pipeline::{FlareCat, JoinReport};
pub use quality_filter::{CalibratedFilter, FilterReport, QualityFilter};
