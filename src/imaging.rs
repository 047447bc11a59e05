//! # Image request planning
//!
//! Describes, for each joined flare, the EUV cutout an image-acquisition tool should
//! fetch: the search window ending at the flare peak, the channel, the sampling and the
//! crop box around the flare position. Nothing is downloaded here.
//!
//! Cutouts are stored as `<letter>_class/YYYY_MM_DD_HH_MM_SS.png`, so the images of one
//! class end up in the same directory.
use camino::{Utf8Path, Utf8PathBuf};
use hifitime::{Epoch, Unit};
use log::info;

use crate::constants::{Angstrom, Seconds};
use crate::interval_matcher::MatchedFlare;
use crate::params::ImagingParams;
use crate::time::format_file_stem;

/// Corners of a square crop box on the solar disk (arcsec, `(x, y)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub top_left: (f64, f64),
    pub top_right: (f64, f64),
    pub bottom_left: (f64, f64),
    pub bottom_right: (f64, f64),
}

impl CropBox {
    /// Box of side `size` centered on `(x, y)`.
    pub fn around(x: f64, y: f64, size: f64) -> Self {
        let half = 0.5 * size;
        CropBox {
            top_left: (x - half, y + half),
            top_right: (x + half, y + half),
            bottom_left: (x - half, y - half),
            bottom_right: (x + half, y - half),
        }
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    pub fn size(&self) -> f64 {
        self.top_right.0 - self.top_left.0
    }
}

/// The cutout to fetch for one flare.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub window_start: Epoch,
    pub window_end: Epoch,
    pub wavelength: Angstrom,
    pub sample_cadence: Seconds,
    pub crop: CropBox,
    /// Path of the cutout, relative to the output directory.
    pub file: Utf8PathBuf,
}

impl ImageRequest {
    pub fn for_flare(flare: &MatchedFlare, params: &ImagingParams) -> Self {
        let window = Unit::Second * i64::from(params.search_window);
        let file = Utf8PathBuf::from(format!("{}_class", flare.class.letter))
            .join(format!("{}.png", format_file_stem(&flare.peak_time)));

        ImageRequest {
            window_start: flare.peak_time - window,
            window_end: flare.peak_time,
            wavelength: params.wavelength,
            sample_cadence: params.sample_cadence,
            crop: CropBox::around(
                f64::from(flare.x_pos),
                f64::from(flare.y_pos),
                params.crop_box_size,
            ),
            file,
        }
    }

    /// Location of the cutout under `root`.
    pub fn output_path(&self, root: &Utf8Path) -> Utf8PathBuf {
        root.join(&self.file)
    }
}

/// Requests for the flares the imager could observe (peak at or after first light).
pub fn plan_image_requests(flares: &[MatchedFlare], params: &ImagingParams) -> Vec<ImageRequest> {
    let requests: Vec<ImageRequest> = flares
        .iter()
        .filter(|flare| flare.peak_time >= params.first_light)
        .map(|flare| ImageRequest::for_flare(flare, params))
        .collect();

    info!(
        "Planned {} image requests ({} flares before first light)",
        requests.len(),
        flares.len() - requests.len()
    );
    requests
}

#[cfg(test)]
mod imaging_test {
    use super::*;
    use crate::time::{format_timestamp, parse_timestamp};
    use approx::assert_relative_eq;

    fn flare(peak: &str, x_pos: i32, y_pos: i32, class: &str) -> MatchedFlare {
        MatchedFlare {
            peak_time: parse_timestamp(peak).unwrap(),
            x_pos,
            y_pos,
            class: class.parse().unwrap(),
        }
    }

    #[test]
    fn test_crop_box() {
        let crop = CropBox::around(200.0, -221.0, 100.0);
        assert_eq!(
            crop.corners(),
            [
                (150.0, -171.0),
                (250.0, -171.0),
                (150.0, -271.0),
                (250.0, -271.0)
            ]
        );
        assert_relative_eq!(crop.size(), 100.0);
    }

    #[test]
    fn test_image_request() {
        let params = ImagingParams::default();
        let flare = flare("2011-02-15 01:56:10", 200, -221, "C1.1");
        let request = ImageRequest::for_flare(&flare, &params);

        assert_eq!(
            format_timestamp(&request.window_start),
            "2011-02-15 01:56:00"
        );
        assert_eq!(format_timestamp(&request.window_end), "2011-02-15 01:56:10");
        assert_eq!(request.wavelength, 94);
        assert_eq!(request.sample_cadence, 12);
        assert_eq!(request.file.as_str(), "C_class/2011_02_15_01_56_10.png");
        assert_eq!(
            request.output_path(Utf8Path::new("data")).as_str(),
            "data/C_class/2011_02_15_01_56_10.png"
        );
    }

    #[test]
    fn test_plan_skips_flares_before_first_light() {
        let flares = vec![
            flare("2010-06-06 02:52:57", 0, 0, "B"),
            flare("2010-06-06 02:52:58", 10, 10, "B"),
            flare("2012-01-01 00:00:00", 20, 20, "C"),
        ];
        let requests = plan_image_requests(&flares, &ImagingParams::default());

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].file.as_str(), "B_class/2010_06_06_02_52_58.png");
        assert_eq!(requests[1].file.as_str(), "C_class/2012_01_01_00_00_00.png");
    }
}
