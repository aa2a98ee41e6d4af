//! ISO 3166-1 alpha-2 country bounds table.
//!
//! The table backs `IsoCode` regions. A small built-in set of approximate
//! extents ships with the crate; more codes (or more precise extents) can be
//! loaded from a JSON file mapping codes to bounds:
//!
//! ```json
//! {
//!   "JP": [122.93, 153.99, 20.42, 45.56],
//!   "IS": {"west": -24.55, "east": -13.49, "south": 63.29, "north": 66.57}
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use super::bbox::BoundingBox;
use super::resolver::BoundsProvider;
use crate::config::RegionsConfig;
use crate::error::{GeoRegionError, Result};
use crate::logging::{
    log_code_table_stats, log_error, log_operation_end, log_operation_start,
};

/// Approximate west/east/south/north extents, mainland territory only
const BUILTIN_BOUNDS: &[(&str, [f64; 4])] = &[
    ("AR", [-73.6, -53.6, -55.1, -21.8]),
    ("AU", [112.9, 153.7, -43.7, -10.6]),
    ("BR", [-74.0, -34.8, -33.8, 5.3]),
    ("CA", [-141.0, -52.6, 41.7, 83.1]),
    ("CH", [5.9, 10.5, 45.8, 47.8]),
    ("CN", [73.5, 134.8, 18.2, 53.6]),
    ("DE", [5.9, 15.0, 47.3, 55.1]),
    ("EG", [24.7, 36.9, 22.0, 31.7]),
    ("ES", [-9.3, 3.3, 36.0, 43.8]),
    ("FR", [-5.2, 9.6, 41.3, 51.1]),
    ("GB", [-8.2, 1.8, 49.9, 60.9]),
    ("GR", [19.4, 29.6, 34.8, 41.8]),
    ("ID", [95.0, 141.0, -11.0, 6.1]),
    ("IN", [68.1, 97.4, 6.7, 35.5]),
    ("IS", [-24.6, -13.5, 63.3, 66.6]),
    ("IT", [6.6, 18.5, 35.5, 47.1]),
    ("JP", [122.93, 153.99, 20.42, 45.56]),
    ("KR", [124.6, 131.9, 33.1, 38.6]),
    ("MX", [-118.4, -86.7, 14.5, 32.7]),
    ("NO", [4.6, 31.1, 57.9, 71.2]),
    ("NZ", [166.4, 178.6, -47.3, -34.4]),
    ("PT", [-9.5, -6.2, 36.9, 42.2]),
    ("TW", [120.0, 122.0, 21.9, 25.3]),
    ("US", [-124.8, -66.9, 24.4, 49.4]),
    ("ZA", [16.5, 32.9, -34.8, -22.1]),
];

/// Bounds as written in a table file: an array or an object
#[derive(Deserialize)]
#[serde(untagged)]
enum TableEntry {
    Array([f64; 4]),
    Object(BoundingBox),
}

/// In-memory table of country bounding boxes keyed by upper-case ISO code
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    entries: BTreeMap<String, BoundingBox>,
}

impl CountryTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of approximate country extents
    pub fn builtin() -> Self {
        let entries = BUILTIN_BOUNDS
            .iter()
            .filter_map(|(code, [w, e, s, n])| {
                BoundingBox::new(*w, *e, *s, *n)
                    .ok()
                    .map(|bbox| (code.to_string(), bbox))
            })
            .collect();
        Self { entries }
    }

    /// Parse a table from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut table = Self::new();
        for (code, value) in raw {
            let key = normalize_code(&code).ok_or_else(|| GeoRegionError::Config {
                message: format!("Invalid country code in table: '{}'", code),
            })?;

            let entry: TableEntry =
                serde_json::from_value(value).map_err(|e| GeoRegionError::Config {
                    message: format!("Invalid bounds for '{}': {}", code, e),
                })?;

            let bbox = match entry {
                TableEntry::Array([w, e, s, n]) => {
                    BoundingBox::new(w, e, s, n).map_err(|e| GeoRegionError::Config {
                        message: format!("Invalid bounds for '{}': {}", code, e),
                    })?
                }
                TableEntry::Object(bbox) => bbox,
            };

            table.insert(&key, bbox)?;
        }

        Ok(table)
    }

    /// Load a table from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build the table described by the configuration: the built-in codes
    /// (unless disabled) overridden by the optional codes file.
    pub fn load(config: &RegionsConfig) -> Result<Self> {
        let start = Instant::now();
        let source = config
            .codes_file
            .as_ref()
            .map(|p| p.display().to_string());
        log_operation_start("code_table_load", source.as_deref());

        match Self::assemble(config) {
            Ok(table) => {
                log_operation_end("code_table_load", start, true);
                log_code_table_stats(source.as_deref().unwrap_or("builtin"), table.len());
                Ok(table)
            }
            Err(e) => {
                log_operation_end("code_table_load", start, false);
                log_error(&e, "code_table_load");
                Err(e)
            }
        }
    }

    fn assemble(config: &RegionsConfig) -> Result<Self> {
        let mut table = if config.include_builtin {
            Self::builtin()
        } else {
            Self::new()
        };

        if let Some(path) = &config.codes_file {
            table.merge(Self::from_file(path)?);
        }

        if table.is_empty() {
            return Err(GeoRegionError::Config {
                message: "No country codes available: built-in table disabled and no codes file \
                          given"
                    .to_string(),
            });
        }

        Ok(table)
    }

    /// Add or replace a code's bounds
    pub fn insert(&mut self, code: &str, bbox: BoundingBox) -> Result<()> {
        let key = normalize_code(code).ok_or_else(|| GeoRegionError::InvalidParameter {
            param: "code".to_string(),
            message: format!("'{}' is not a two-letter country code", code),
        })?;
        self.entries.insert(key, bbox);
        Ok(())
    }

    /// Copy all entries of `other` into this table, replacing duplicates
    pub fn merge(&mut self, other: CountryTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, code: &str) -> Option<&BoundingBox> {
        normalize_code(code).and_then(|key| self.entries.get(&key))
    }

    /// Known codes in sorted order
    pub fn codes(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundingBox)> {
        self.entries.iter().map(|(code, bbox)| (code.as_str(), bbox))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BoundsProvider for CountryTable {
    fn bounds_for(&self, code: &str) -> Result<BoundingBox> {
        self.get(code)
            .copied()
            .ok_or_else(|| GeoRegionError::UnknownRegionCode {
                code: code.to_string(),
            })
    }
}

fn normalize_code(code: &str) -> Option<String> {
    let code = code.trim();
    (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_uppercase())
}
