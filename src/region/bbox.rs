//! The normalized bounding box produced by region resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GeoRegionError, Result};

/// A geographic bounding box in degrees.
///
/// Always satisfies `west < east` and `south < north` with finite bounds.
/// Fields are private so a constructed box cannot be made invalid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct BoundingBox {
    west: f64,
    east: f64,
    south: f64,
    north: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    west: f64,
    east: f64,
    south: f64,
    north: f64,
}

impl TryFrom<RawBounds> for BoundingBox {
    type Error = GeoRegionError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        BoundingBox::new(raw.west, raw.east, raw.south, raw.north)
    }
}

impl BoundingBox {
    /// Create a bounding box, checking ordering and finiteness
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Result<Self> {
        if ![west, east, south, north].iter().all(|v| v.is_finite()) {
            return Err(GeoRegionError::invalid_region(format!(
                "bounds must be finite numbers, got {}/{}/{}/{}",
                west, east, south, north
            )));
        }

        if west >= east {
            return Err(GeoRegionError::invalid_region(format!(
                "west ({}) must be less than east ({})",
                west, east
            )));
        }

        if south >= north {
            return Err(GeoRegionError::invalid_region(format!(
                "south ({}) must be less than north ({})",
                south, north
            )));
        }

        Ok(Self {
            west,
            east,
            south,
            north,
        })
    }

    /// The smallest box containing all points, padded by `margin` degrees on each side.
    ///
    /// Points are `(lon, lat)` pairs. A single point with zero margin has no
    /// extent and is rejected.
    pub fn from_points(points: &[(f64, f64)], margin: f64) -> Result<Self> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(GeoRegionError::invalid_region(format!(
                "margin must be a non-negative number, got {}",
                margin
            )));
        }

        let (first, rest) = points
            .split_first()
            .ok_or_else(|| GeoRegionError::invalid_region("no points to compute an extent from"))?;

        let mut extent = [first.0, first.0, first.1, first.1];
        for &(lon, lat) in std::iter::once(first).chain(rest) {
            if !lon.is_finite() || !lat.is_finite() {
                return Err(GeoRegionError::invalid_region(format!(
                    "point ({}, {}) is not finite",
                    lon, lat
                )));
            }
            extent[0] = extent[0].min(lon);
            extent[1] = extent[1].max(lon);
            extent[2] = extent[2].min(lat);
            extent[3] = extent[3].max(lat);
        }

        Self::new(
            extent[0] - margin,
            extent[1] + margin,
            extent[2] - margin,
            extent[3] + margin,
        )
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    /// Longitude span in degrees
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span in degrees
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Whether a point lies inside the box (edges included)
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.west..=self.east).contains(&lon) && (self.south..=self.north).contains(&lat)
    }

    /// Bounds in west, east, south, north order
    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.east, self.south, self.north]
    }
}

/// Formats as `west/east/south/north`, which parses back to the same box.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.west, self.east, self.south, self.north)
    }
}
