//! Resolution of region descriptors into bounding boxes.

use tracing::debug;

use super::bbox::BoundingBox;
use super::descriptor::RegionDescriptor;
use super::expand::expand_bounds;
use crate::error::{GeoRegionError, Result};

/// Source of bounding boxes for ISO country codes.
///
/// Implementations return [`GeoRegionError::UnknownRegionCode`] for codes
/// they do not know; the resolver passes that error through unchanged.
pub trait BoundsProvider {
    fn bounds_for(&self, code: &str) -> Result<BoundingBox>;
}

impl<F> BoundsProvider for F
where
    F: Fn(&str) -> Result<BoundingBox>,
{
    fn bounds_for(&self, code: &str) -> Result<BoundingBox> {
        self(code)
    }
}

/// Resolve a descriptor into a validated bounding box.
pub fn resolve<P>(descriptor: &RegionDescriptor, provider: &P) -> Result<BoundingBox>
where
    P: BoundsProvider + ?Sized,
{
    let [west, east, south, north] = resolve_bounds(descriptor, provider)?;
    let bbox = BoundingBox::new(west, east, south, north).map_err(|e| {
        GeoRegionError::invalid_region(format!(
            "region '{}' resolves to an empty box: {}",
            descriptor, e
        ))
    })?;

    debug!(region = %descriptor, bbox = %bbox, "Resolved region");
    Ok(bbox)
}

/// Parse and resolve a region string such as `10/20/35/45` or `JP+r3`.
pub fn resolve_str<P>(input: &str, provider: &P) -> Result<BoundingBox>
where
    P: BoundsProvider + ?Sized,
{
    let descriptor: RegionDescriptor = input.parse()?;
    resolve(&descriptor, provider)
}

/// Resolve a list of four numbers in `xmin, xmax, ymin, ymax` order.
pub fn resolve_values<P>(values: &[f64], provider: &P) -> Result<BoundingBox>
where
    P: BoundsProvider + ?Sized,
{
    let descriptor = RegionDescriptor::from_values(values)?;
    resolve(&descriptor, provider)
}

fn resolve_bounds<P>(descriptor: &RegionDescriptor, provider: &P) -> Result<[f64; 4]>
where
    P: BoundsProvider + ?Sized,
{
    let bounds = match descriptor {
        RegionDescriptor::Coordinates {
            xmin,
            xmax,
            ymin,
            ymax,
        } => [xmin.min(*xmax), xmin.max(*xmax), ymin.min(*ymax), ymin.max(*ymax)],
        RegionDescriptor::CornerPair {
            lon0,
            lat0,
            lon1,
            lat1,
        } => [lon0.min(*lon1), lon0.max(*lon1), lat0.min(*lat1), lat0.max(*lat1)],
        RegionDescriptor::Global(shortcut) => shortcut.bounds(),
        RegionDescriptor::IsoCode(code) => provider.bounds_for(code)?.to_array(),
        RegionDescriptor::Expansion {
            base,
            mode,
            increments,
        } => expand_bounds(resolve_bounds(base, provider)?, *mode, increments),
    };
    Ok(bounds)
}
