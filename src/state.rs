//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{GeoRegionError, Result};
use crate::region::CountryTable;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Bounds provider for ISO code regions
    pub codes: CountryTable,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, codes: CountryTable) -> Self {
        Self { config, codes }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, codes: CountryTable) -> Arc<Self> {
        Arc::new(Self::new(config, codes))
    }

    /// Build state from configuration, loading the country table it names
    pub fn from_config(config: Config) -> Result<Self> {
        let codes = CountryTable::load(&config.regions)?;
        Ok(Self::new(config, codes))
    }

    /// Validate the state
    pub fn validate(&self) -> Result<()> {
        if self.codes.is_empty() {
            return Err(GeoRegionError::Config {
                message: "Country code table is empty".to_string(),
            });
        }
        Ok(())
    }
}
