//! # Constants and type definitions for flarecat
//!
//! This module centralizes the **catalog conventions**, **default configuration values**,
//! and **common type definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit aliases (arcseconds, seconds, ångström)
//! - Layout constants for the HESSI and GOES text catalogs
//! - Default quality-filter and imaging settings
//! - Default remote locations of the catalogs (only used when a caller asks for them)

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Position on the solar disk in arcseconds (integer catalog resolution)
pub type ArcSec = i32;
/// Duration in seconds
pub type Seconds = u32;
/// Wavelength in ångström
pub type Angstrom = u32;
/// HESSI flare identifier
pub type FlareId = u32;

// -------------------------------------------------------------------------------------------------
// Catalog layout
// -------------------------------------------------------------------------------------------------

/// Separator used to store the trailing HESSI flag tokens in one field
pub const FLAG_SEPARATOR: char = '-';

/// Mandatory HESSI fields once the date token has been removed:
/// `id start peak end dur peak_rate total energy x y radial ar`
pub const HESSI_MANDATORY_FIELDS: usize = 12;

/// Mandatory GOES fields once the date token has been removed: `start end peak class`
pub const GOES_MANDATORY_FIELDS: usize = 4;

/// Longest GOES intensity field (`171` for X17.1); longer digit runs are region numbers
pub const GOES_MAX_INTENSITY_DIGITS: usize = 3;

/// Character range of the `YYMMDD` date inside the first GOES token
pub const GOES_DATE_RANGE: std::ops::Range<usize> = 5..11;

/// Character used by the GOES reports to mark a missing value (e.g. `////`)
pub const MISSING_MARKER: char = '/';

// -------------------------------------------------------------------------------------------------
// Defaults
// -------------------------------------------------------------------------------------------------

/// Flags rejected by default: non-solar event, spacecraft in the South Atlantic Anomaly
pub const DEFAULT_BAD_FLAGS: [&str; 2] = ["NS", "SD"];

/// Percentile of the radial distance above which a location is an outlier
pub const DEFAULT_RADIAL_PERCENTILE: f64 = 99.0;

/// Side of the crop box around a flare (arcsec)
pub const DEFAULT_CROP_BOX_SIZE: f64 = 100.0;

/// Length of the image search window ending at the flare peak (s)
pub const DEFAULT_SEARCH_WINDOW: Seconds = 10;

/// EUV channel used for the flare cutouts
pub const DEFAULT_WAVELENGTH: Angstrom = 94;

/// Sample cadence of the image search (s)
pub const DEFAULT_SAMPLE_CADENCE: Seconds = 12;

/// First light of the imager; no cutout can be requested before this instant
pub const IMAGER_FIRST_LIGHT: &str = "2010-06-06 02:52:58";

// -------------------------------------------------------------------------------------------------
// Remote catalogs
// -------------------------------------------------------------------------------------------------

/// HESSI flare list
pub const HESSI_FLARE_LIST_URL: &str =
    "https://hesperia.gsfc.nasa.gov/hessidata/dbase/hessi_flare_list.txt";

/// Directory of the GOES XRS yearly reports
pub const GOES_XRS_BASE_URL: &str =
    "https://www.ngdc.noaa.gov/stp/space-weather/solar-data/solar-features/solar-flares/x-rays/goes/xrs";
