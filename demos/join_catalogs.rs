//! Join a HESSI flare list with GOES XRS reports and write the joined CSV.
//!
//! ```text
//! cargo run --example join_catalogs -- <hessi_flare_list.txt> <goes_report.txt>...
//! ```
//!
//! Without arguments the test fixtures are used. The CSV is written to
//! `hessi_goes_flare_data.csv` in the system temporary directory.
use std::env;

use camino::Utf8PathBuf;
use flarecat::{CatalogSource, FlareCat, FlareCatError, JoinParams};

fn main() -> Result<(), FlareCatError> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (hessi, goes) = match args.split_first() {
        Some((hessi, goes)) if !goes.is_empty() => (
            CatalogSource::file(hessi.as_str()),
            goes.iter().map(|g| CatalogSource::file(g.as_str())).collect::<Vec<_>>(),
        ),
        _ => (
            CatalogSource::file("tests/data/hessi_sample.txt"),
            vec![
                CatalogSource::file("tests/data/goes_sample.txt"),
                CatalogSource::file("tests/data/goes_sample_2012.txt"),
            ],
        ),
    };

    let params = JoinParams::builder()
        .bad_flags(["NS", "SD"])
        .radial_percentile(99.0)
        .build()?;
    let flarecat = FlareCat::new(params)?;

    let report = flarecat.run(&hessi, &goes)?;
    println!("{report:#}");

    let out_dir = Utf8PathBuf::from_path_buf(env::temp_dir())
        .map_err(|p| FlareCatError::Utf8PathError(p.display().to_string()))?;
    let out_file = out_dir.join("hessi_goes_flare_data.csv");
    report.joined.to_csv_path(&out_file)?;
    println!("\nJoined dataset written to {out_file}");

    println!("\nImage requests:");
    for request in flarecat.image_requests(&report) {
        println!(
            "  {} ({} Å, every {} s, box {:?} → {:?})",
            request.file,
            request.wavelength,
            request.sample_cadence,
            request.crop.bottom_left,
            request.crop.top_right
        );
    }
    Ok(())
}
