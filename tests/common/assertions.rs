//! Assertion utilities for testing.
//!
//! Floating-point comparisons for resolved bounds.

use georegion::BoundingBox;

/// Tolerance for comparing resolved bounds
const BOUNDS_EPSILON: f64 = 1e-9;

/// Assert that a box has the expected west, east, south, north bounds.
pub fn assert_bounds(bbox: &BoundingBox, expected: [f64; 4]) {
    for (side, (actual, expected)) in ["west", "east", "south", "north"]
        .iter()
        .zip(bbox.to_array().into_iter().zip(expected))
    {
        let diff = (actual - expected).abs();
        assert!(
            diff <= BOUNDS_EPSILON,
            "{} bound differs: actual = {}, expected = {} (box {})",
            side,
            actual,
            expected,
            bbox
        );
    }
}

/// Assert that `value` is a whole multiple of `increment`.
pub fn assert_multiple_of(value: f64, increment: f64) {
    let steps = value / increment;
    assert!(
        (steps - steps.round()).abs() < 1e-6,
        "{} is not a multiple of {}",
        value,
        increment
    );
}
