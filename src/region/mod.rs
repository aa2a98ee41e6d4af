//! Region parsing, expansion and resolution.
//!
//! This module turns the many accepted forms of a map region into a single
//! normalized [`BoundingBox`].

pub mod bbox;
pub mod codes;
pub mod descriptor;
pub mod expand;
pub mod resolver;

pub use bbox::BoundingBox;
pub use codes::CountryTable;
pub use descriptor::{ExpansionMode, GlobalShortcut, Increments, RegionDescriptor, RegionInput};
pub use expand::expand_bounds;
pub use resolver::{resolve, resolve_str, resolve_values, BoundsProvider};
