//! Error types for the georegion crate.
//!
//! A single error enum covers region parsing, code lookup, configuration,
//! and server failures.

use thiserror::Error;

/// The main error type for georegion operations.
#[derive(Error, Debug)]
pub enum GeoRegionError {
    /// Malformed region descriptor, or a region whose bounds end up inverted
    #[error("Invalid region: {message}")]
    InvalidRegion { message: String },

    /// ISO code that the bounds provider does not know
    #[error("Unknown region code: {code}")]
    UnknownRegionCode { code: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl GeoRegionError {
    /// Shorthand for an [`GeoRegionError::InvalidRegion`] with the given message
    pub fn invalid_region(message: impl Into<String>) -> Self {
        GeoRegionError::InvalidRegion {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with GeoRegionError
pub type Result<T> = std::result::Result<T, GeoRegionError>;
