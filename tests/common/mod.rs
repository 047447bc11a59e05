use camino::Utf8Path;
use flarecat::time::format_timestamp;
use flarecat::{CatalogSource, MatchedFlare};

pub fn hessi_source() -> CatalogSource {
    CatalogSource::file(Utf8Path::new("tests/data/hessi_sample.txt"))
}

pub fn goes_sources() -> Vec<CatalogSource> {
    vec![
        CatalogSource::file(Utf8Path::new("tests/data/goes_sample.txt")),
        CatalogSource::file(Utf8Path::new("tests/data/goes_sample_2012.txt")),
    ]
}

pub fn assert_flare(flare: &MatchedFlare, peak: &str, x_pos: i32, y_pos: i32, class: &str) {
    assert_eq!(format_timestamp(&flare.peak_time), peak);
    assert_eq!((flare.x_pos, flare.y_pos), (x_pos, y_pos));
    assert_eq!(flare.class.to_string(), class);
}
