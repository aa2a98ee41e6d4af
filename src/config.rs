//! Configuration management for georegion.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GeoRegionError, Result};

/// Command-line arguments for the georegion server
#[derive(Parser, Debug)]
#[command(name = "georegion")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "GEOREGION_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "GEOREGION_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "GEOREGION_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "GEOREGION_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON file of ISO country code bounds, merged over the built-in table
    #[arg(long, env = "GEOREGION_CODES")]
    pub codes: Option<PathBuf>,

    /// Do not load the built-in country table
    #[arg(long)]
    pub no_builtin: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEOREGION_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Region resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// JSON file of country code bounds
    #[serde(default)]
    pub codes_file: Option<PathBuf>,

    /// Whether to start from the built-in country table
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Margin in degrees added around point extents when none is requested
    #[serde(default = "default_margin")]
    pub default_margin: f64,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Region configuration
    #[serde(default)]
    pub regions: RegionsConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.workers.is_some() {
            config.server.workers = args.workers;
        }
        if args.codes.is_some() {
            config.regions.codes_file = args.codes;
        }
        if args.no_builtin {
            config.regions.include_builtin = false;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.workers.is_some() {
            self.server.workers = other.server.workers;
        }
        self.regions = other.regions;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(GeoRegionError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // 0 would mean an ephemeral port, which is no use to clients
        if self.server.port == 0 {
            return Err(GeoRegionError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(GeoRegionError::Config {
                message: "Worker count must be at least 1".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GeoRegionError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        let margin = self.regions.default_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(GeoRegionError::Config {
                message: format!("Invalid default margin: {}. Must be >= 0", margin),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            regions: RegionsConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            codes_file: None,
            include_builtin: default_include_builtin(),
            default_margin: default_margin(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_include_builtin() -> bool {
    true
}

fn default_margin() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["georegion"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(config.regions.include_builtin);
        assert_eq!(config.regions.default_margin, 1.0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.server.port = 9000;
        config2.server.workers = Some(4);
        config2.regions.default_margin = 2.5;

        config1.merge(config2);

        assert_eq!(config1.server.port, 9000);
        assert_eq!(config1.server.workers, Some(4));
        assert_eq!(config1.regions.default_margin, 2.5);
    }

    #[test]
    fn test_config_validation() {
        // Valid config should pass
        let config = Config::default();
        assert!(config.validate().is_ok());

        // Test invalid host
        let mut config = Config::default();
        config.server.host = "".to_string();
        assert!(config.validate().is_err());

        // Test invalid port
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        // Test invalid worker count
        let mut config = Config::default();
        config.server.workers = Some(0);
        assert!(config.validate().is_err());

        // Test invalid log level
        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        // Test invalid margin
        let mut config = Config::default();
        config.regions.default_margin = -1.0;
        assert!(config.validate().is_err());
        config.regions.default_margin = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_args_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server": {{"port": 9100}}, "regions": {{"default_margin": 0.5}}, {}}}"#,
            r#""log_level": "debug""#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = Config::from_args(args(&["--config", &path])).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.regions.default_margin, 0.5);
        assert_eq!(config.log_level, "debug");

        let overrides = ["--config", path.as_str(), "--port", "9200", "--no-builtin"];
        let config = Config::from_args(args(&overrides)).unwrap();
        assert_eq!(config.server.port, 9200);
        assert!(!config.regions.include_builtin);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::from_args(args(&["--config", "/nonexistent/georegion.json"]));
        assert!(matches!(result, Err(GeoRegionError::Io(_))));
    }
}
