//! # Catalog ingestion
//!
//! The [`CatalogFile`] trait builds or extends a [`CatalogLoad`] from a [`CatalogSource`]
//! or from an in-memory text. It is implemented for the two catalogs:
//!
//! * [`HessiCatalog`] with the [`read_hessi`](super::hessi_reader::read_hessi) row layout,
//! * [`GoesCatalog`] with the [`read_goes`](super::goes_reader::read_goes) row layout.
//!
//! Constructors (`new_from_*`) create a new catalog, appenders (`add_from_*`) extend an
//! existing one. Events keep the order in which sources are added.
//!
//! Note
//! ----
//! * No deduplication is done: adding the same source twice duplicates its events.
//! * Only source level failures (file not found, HTTP error, ...) are returned as errors.
//!   Bad rows are recorded in [`CatalogLoad::skipped`].
use crate::catalog_source::CatalogSource;
use crate::flarecat_errors::FlareCatError;

use super::goes_reader::read_goes;
use super::hessi_reader::read_hessi;
use super::{CatalogLoad, GoesCatalog, HessiCatalog};

pub trait CatalogFile: Sized + Default {
    /// Parse a catalog text.
    ///
    /// Arguments
    /// -----------------
    /// * `text`: the catalog content
    /// * `label`: name reported for skipped rows
    fn new_from_text(text: &str, label: &str) -> Self;

    /// Parse a catalog text and append its events.
    fn add_from_text(&mut self, text: &str, label: &str);

    /// Read and parse a catalog source.
    ///
    /// Return
    /// ----------
    /// * The catalog, or the error raised while reading the source.
    fn new_from_source(source: &CatalogSource) -> Result<Self, FlareCatError> {
        let text = source.read()?;
        Ok(Self::new_from_text(&text, &source.label()))
    }

    /// Read a catalog source and append its events.
    fn add_from_source(&mut self, source: &CatalogSource) -> Result<(), FlareCatError> {
        let text = source.read()?;
        self.add_from_text(&text, &source.label());
        Ok(())
    }

    /// Read several sources in order into a single catalog.
    ///
    /// The first failing source stops the load.
    fn new_from_sources(sources: &[CatalogSource]) -> Result<Self, FlareCatError> {
        let mut catalog = Self::default();
        for source in sources {
            catalog.add_from_source(source)?;
        }
        Ok(catalog)
    }
}

impl CatalogFile for HessiCatalog {
    fn new_from_text(text: &str, label: &str) -> Self {
        read_hessi(text, label)
    }

    fn add_from_text(&mut self, text: &str, label: &str) {
        self.extend(read_hessi(text, label));
    }
}

impl CatalogFile for GoesCatalog {
    fn new_from_text(text: &str, label: &str) -> Self {
        read_goes(text, label)
    }

    fn add_from_text(&mut self, text: &str, label: &str) {
        self.extend(read_goes(text, label));
    }
}

impl<T> FromIterator<CatalogLoad<T>> for CatalogLoad<T> {
    fn from_iter<I: IntoIterator<Item = CatalogLoad<T>>>(iter: I) -> Self {
        iter.into_iter().fold(CatalogLoad::new(), |mut acc, load| {
            acc.extend(load);
            acc
        })
    }
}
