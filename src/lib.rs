//! # georegion
//!
//! Resolve map region descriptors into normalized bounding boxes.
//!
//! Mapping tools accept a region in many shapes: `xmin/xmax/ymin/ymax`
//! strings or lists, corner pairs (`lon0/lat0/lon1/lat1+r`), the whole-globe
//! shortcuts `d` and `g`, two-letter ISO country codes, and rounding or
//! padding modifiers (`+r`, `+R`, `+e`). This crate parses all of them into a
//! [`RegionDescriptor`] and resolves it into a [`BoundingBox`].
//!
//! ```
//! use georegion::region::{resolve_str, CountryTable};
//!
//! let codes = CountryTable::builtin();
//! let bbox = resolve_str("11/19/36/44+r5", &codes).unwrap();
//! assert_eq!(bbox.to_string(), "10/20/35/45");
//! ```
//!
//! ## Architecture
//!
//! - **Region layer**: parsing, expansion and resolution, with ISO lookups
//!   behind the [`BoundsProvider`] trait
//! - **API layer**: an HTTP service exposing resolution as JSON endpoints

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod region;
pub mod state;

pub use config::Config;
pub use error::{GeoRegionError, Result};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_code_table_stats, log_error,
    log_operation_end, log_operation_start, log_request_error, log_timed_operation,
};
pub use region::{BoundingBox, BoundsProvider, CountryTable, RegionDescriptor};
pub use state::AppState;
