//! # Catalog sources
//!
//! Where the text of a catalog comes from: a local file, a remote URL or an in-memory
//! string. Remote sources are only fetched when the crate is built with the `download`
//! feature; otherwise reading one returns [`FlareCatError::DownloadDisabled`].
use std::fmt;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use log::{debug, info};

use crate::constants::HESSI_FLARE_LIST_URL;
use crate::flarecat_errors::FlareCatError;

/// Origin of a catalog text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(Utf8PathBuf),
    Url(String),
    Text(String),
}

impl CatalogSource {
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        CatalogSource::File(path.into())
    }

    /// Build a file source from a non UTF-8 aware path.
    ///
    /// Return
    /// ----------
    /// * `Err(FlareCatError::Utf8PathError)` if the path is not valid UTF-8.
    pub fn from_std_path(path: PathBuf) -> Result<Self, FlareCatError> {
        Utf8PathBuf::from_path_buf(path)
            .map(CatalogSource::File)
            .map_err(|p| FlareCatError::Utf8PathError(p.display().to_string()))
    }

    pub fn url(url: impl Into<String>) -> Self {
        CatalogSource::Url(url.into())
    }

    pub fn text(content: impl Into<String>) -> Self {
        CatalogSource::Text(content.into())
    }

    /// The published HESSI flare list.
    pub fn hessi_flare_list() -> Self {
        CatalogSource::Url(HESSI_FLARE_LIST_URL.to_string())
    }

    /// Label used in logs and in skipped row reports.
    pub fn label(&self) -> String {
        match self {
            CatalogSource::File(path) => path.to_string(),
            CatalogSource::Url(url) => url.clone(),
            CatalogSource::Text(_) => "<text>".to_string(),
        }
    }

    /// Read the whole catalog text.
    ///
    /// Return
    /// ----------
    /// * The text, or an I/O, HTTP or [`FlareCatError::DownloadDisabled`] error.
    pub fn read(&self) -> Result<String, FlareCatError> {
        match self {
            CatalogSource::File(path) => {
                debug!("Reading catalog file {path}");
                Ok(std::fs::read_to_string(path)?)
            }
            CatalogSource::Url(url) => fetch_text(url),
            CatalogSource::Text(content) => Ok(content.clone()),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Download the body of `url` as text.
#[cfg(feature = "download")]
fn fetch_text(url: &str) -> Result<String, FlareCatError> {
    info!("Downloading {url}...");

    let rt = tokio::runtime::Runtime::new()?;
    let text = rt.block_on(async {
        let body = reqwest::get(url)
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok::<String, FlareCatError>(body)
    })?;

    info!("Downloaded {url} ({} bytes)", text.len());
    Ok(text)
}

#[cfg(not(feature = "download"))]
fn fetch_text(url: &str) -> Result<String, FlareCatError> {
    info!("Skipping {url}: built without the download feature");
    Err(FlareCatError::DownloadDisabled(url.to_string()))
}

#[cfg(test)]
mod catalog_source_test {
    use super::*;

    #[test]
    fn test_text_source() {
        let source = CatalogSource::text("31777020101  1150 1205 1157 C 13");
        assert_eq!(source.label(), "<text>");
        assert_eq!(source.read().unwrap(), "31777020101  1150 1205 1157 C 13");
    }

    #[test]
    fn test_file_source() {
        let source = CatalogSource::file("tests/data/goes_sample.txt");
        assert_eq!(source.to_string(), "tests/data/goes_sample.txt");
        assert!(source.read().unwrap().contains("S20W10"));

        let missing = CatalogSource::file("tests/data/does_not_exist.txt");
        assert!(matches!(missing.read(), Err(FlareCatError::IoError(_))));
    }

    #[test]
    fn test_from_std_path() {
        let source = CatalogSource::from_std_path(PathBuf::from("tests/data/hessi_sample.txt"));
        assert_eq!(
            source.unwrap(),
            CatalogSource::File(Utf8PathBuf::from("tests/data/hessi_sample.txt"))
        );
    }

    #[test]
    fn test_hessi_flare_list_source() {
        let source = CatalogSource::hessi_flare_list();
        assert_eq!(source, CatalogSource::Url(HESSI_FLARE_LIST_URL.to_string()));
        assert!(source.label().ends_with("hessi_flare_list.txt"));
    }

    #[test]
    #[cfg(not(feature = "download"))]
    fn test_url_without_download_feature() {
        let source = CatalogSource::url("https://example.org/goes-xrs-report_2006.txt");
        assert_eq!(
            source.read(),
            Err(FlareCatError::DownloadDisabled(
                "https://example.org/goes-xrs-report_2006.txt".into()
            ))
        );
    }
}
