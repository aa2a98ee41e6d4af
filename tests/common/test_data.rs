//! Test data utilities.
//!
//! Country tables and config files written to temporary locations.

use georegion::config::{Config, RegionsConfig};
use georegion::{AppState, CountryTable};
use std::io::Write;
use tempfile::NamedTempFile;

/// Bounds used for `JP` throughout the tests
pub const JAPAN: [f64; 4] = [122.93, 153.99, 20.42, 45.56];

/// A small country table in the JSON file format
pub fn sample_table_json() -> String {
    serde_json::json!({
        "JP": JAPAN,
        "IS": {"west": -24.55, "east": -13.49, "south": 63.29, "north": 66.57},
        "XA": [0.5, 1.5, -0.5, 0.5],
    })
    .to_string()
}

/// Write `contents` to a new temporary file, kept alive by the returned handle
pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// The sample table without the built-in codes
pub fn sample_table() -> CountryTable {
    CountryTable::from_json_str(&sample_table_json()).expect("Sample table is valid")
}

/// Application state backed by a codes file on disk, as the server would load it
pub fn state_from_codes_file(file: &NamedTempFile, include_builtin: bool) -> AppState {
    let config = Config {
        regions: RegionsConfig {
            codes_file: Some(file.path().to_path_buf()),
            include_builtin,
            default_margin: 1.0,
        },
        ..Default::default()
    };
    AppState::from_config(config).expect("Failed to build state from codes file")
}
