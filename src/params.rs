//! # Join configuration
//!
//! [`JoinParams`] gathers every tunable of the pipeline: the quality filter settings and
//! the image request settings ([`ImagingParams`]). Build it with [`JoinParams::default`]
//! or with the validating [`JoinParams::builder`]:
//!
//! ```rust
//! use flarecat::params::JoinParams;
//!
//! let params = JoinParams::builder()
//!     .bad_flags(["NS", "SD", "PS"])
//!     .radial_percentile(95.0)
//!     .crop_box_size(150.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.bad_flags.len(), 3);
//! ```
//!
//! Validation rules
//! -----------------
//! * `0 <= radial_percentile <= 100`
//! * `crop_box_size > 0`
//! * `wavelength > 0`, `sample_cadence > 0`
//! * `search_window >= 0` (unsigned)
use std::cmp::Ordering::{Equal, Greater, Less};

use hifitime::Epoch;

use crate::constants::{
    Angstrom, Seconds, DEFAULT_BAD_FLAGS, DEFAULT_CROP_BOX_SIZE, DEFAULT_RADIAL_PERCENTILE,
    DEFAULT_SAMPLE_CADENCE, DEFAULT_SEARCH_WINDOW, DEFAULT_WAVELENGTH,
};
use crate::flarecat_errors::FlareCatError;
use crate::quality_filter::QualityFilter;

/// Settings of the image requests built from the joined flares.
///
/// Fields
/// -----------------
/// * `crop_box_size` – side of the square cutout centered on the flare (arcsec).
/// * `search_window` – length of the search window ending at the peak (s).
/// * `wavelength` – EUV channel (Å).
/// * `sample_cadence` – sampling of the image search (s).
/// * `first_light` – flares peaking before this instant get no request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagingParams {
    pub crop_box_size: f64,
    pub search_window: Seconds,
    pub wavelength: Angstrom,
    pub sample_cadence: Seconds,
    pub first_light: Epoch,
}

impl Default for ImagingParams {
    fn default() -> Self {
        ImagingParams {
            crop_box_size: DEFAULT_CROP_BOX_SIZE,
            search_window: DEFAULT_SEARCH_WINDOW,
            wavelength: DEFAULT_WAVELENGTH,
            sample_cadence: DEFAULT_SAMPLE_CADENCE,
            // 2010-06-06 02:52:58, see `IMAGER_FIRST_LIGHT`
            first_light: Epoch::from_gregorian_tai_hms(2010, 6, 6, 2, 52, 58),
        }
    }
}

/// Configuration of the join pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinParams {
    /// Flag codes that disqualify a location event.
    pub bad_flags: Vec<String>,
    /// Percentile of the radial distances used as the outlier cut.
    pub radial_percentile: f64,
    pub imaging: ImagingParams,
}

impl Default for JoinParams {
    fn default() -> Self {
        JoinParams {
            bad_flags: DEFAULT_BAD_FLAGS.iter().map(|f| f.to_string()).collect(),
            radial_percentile: DEFAULT_RADIAL_PERCENTILE,
            imaging: ImagingParams::default(),
        }
    }
}

impl JoinParams {
    pub fn builder() -> JoinParamsBuilder {
        JoinParamsBuilder::new()
    }

    /// Quality filter configured with these parameters.
    pub fn quality_filter(&self) -> Result<QualityFilter, FlareCatError> {
        QualityFilter::new(self.bad_flags.iter().cloned(), self.radial_percentile)
    }
}

/// Fluent builder of [`JoinParams`], checked by [`build`](JoinParamsBuilder::build).
#[derive(Debug, Clone)]
pub struct JoinParamsBuilder {
    params: JoinParams,
}

impl Default for JoinParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JoinParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: JoinParams::default(),
        }
    }

    // --- Quality filter ---
    pub fn bad_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.bad_flags = flags.into_iter().map(Into::into).collect();
        self
    }
    pub fn radial_percentile(mut self, v: f64) -> Self {
        self.params.radial_percentile = v;
        self
    }

    // --- Imaging ---
    pub fn crop_box_size(mut self, v: f64) -> Self {
        self.params.imaging.crop_box_size = v;
        self
    }
    pub fn search_window(mut self, v: Seconds) -> Self {
        self.params.imaging.search_window = v;
        self
    }
    pub fn wavelength(mut self, v: Angstrom) -> Self {
        self.params.imaging.wavelength = v;
        self
    }
    pub fn sample_cadence(mut self, v: Seconds) -> Self {
        self.params.imaging.sample_cadence = v;
        self
    }
    pub fn first_light(mut self, v: Epoch) -> Self {
        self.params.imaging.first_light = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff lo <= x <= hi and comparable.
    #[inline]
    fn within(x: f64, lo: f64, hi: f64) -> bool {
        matches!(x.partial_cmp(&lo), Some(Greater) | Some(Equal))
            && matches!(x.partial_cmp(&hi), Some(Less) | Some(Equal))
    }

    /// Validate and produce the [`JoinParams`].
    ///
    /// Return
    /// ----------
    /// * `Err(FlareCatError::InvalidParameter)` naming the first rule that fails.
    pub fn build(self) -> Result<JoinParams, FlareCatError> {
        let p = &self.params;

        if !Self::within(p.radial_percentile, 0.0, 100.0) {
            return Err(FlareCatError::InvalidParameter(
                "radial_percentile must be in [0, 100]".into(),
            ));
        }
        if !Self::gt0(p.imaging.crop_box_size) {
            return Err(FlareCatError::InvalidParameter(
                "crop_box_size must be > 0".into(),
            ));
        }
        if p.imaging.wavelength == 0 {
            return Err(FlareCatError::InvalidParameter(
                "wavelength must be > 0".into(),
            ));
        }
        if p.imaging.sample_cadence == 0 {
            return Err(FlareCatError::InvalidParameter(
                "sample_cadence must be > 0".into(),
            ));
        }
        if p.bad_flags.iter().any(|f| f.trim().is_empty()) {
            return Err(FlareCatError::InvalidParameter(
                "bad_flags must not contain an empty code".into(),
            ));
        }

        Ok(self.params)
    }
}

#[cfg(test)]
mod params_test {
    use super::*;
    use crate::constants::IMAGER_FIRST_LIGHT;
    use crate::time::format_timestamp;

    #[test]
    fn test_defaults() {
        let params = JoinParams::default();
        assert_eq!(params.bad_flags, vec!["NS".to_string(), "SD".to_string()]);
        assert_eq!(params.radial_percentile, 99.0);
        assert_eq!(params.imaging.wavelength, 94);
        assert_eq!(params.imaging.search_window, 10);
        assert_eq!(params.imaging.sample_cadence, 12);
        assert_eq!(
            format_timestamp(&params.imaging.first_light),
            IMAGER_FIRST_LIGHT
        );

        assert_eq!(JoinParams::builder().build().unwrap(), params);
    }

    #[test]
    fn test_builder() {
        let params = JoinParams::builder()
            .bad_flags(["NS"])
            .radial_percentile(95.0)
            .crop_box_size(150.0)
            .search_window(30)
            .wavelength(131)
            .sample_cadence(24)
            .build()
            .unwrap();

        assert_eq!(params.bad_flags, vec!["NS".to_string()]);
        assert_eq!(params.imaging.crop_box_size, 150.0);
        assert_eq!(params.imaging.wavelength, 131);

        let filter = params.quality_filter().unwrap();
        assert_eq!(filter.radial_percentile(), 95.0);
        assert!(filter.bad_flags().contains("NS"));
    }

    #[test]
    fn test_builder_validation() {
        let invalid = [
            JoinParams::builder().radial_percentile(100.5).build(),
            JoinParams::builder().radial_percentile(f64::NAN).build(),
            JoinParams::builder().crop_box_size(0.0).build(),
            JoinParams::builder().wavelength(0).build(),
            JoinParams::builder().sample_cadence(0).build(),
            JoinParams::builder().bad_flags(["NS", " "]).build(),
        ];
        for result in invalid {
            assert!(matches!(result, Err(FlareCatError::InvalidParameter(_))));
        }
        assert!(JoinParams::builder().radial_percentile(0.0).build().is_ok());
        assert!(JoinParams::builder().search_window(0).build().is_ok());
    }
}
