//! Padding and rounding of resolved bounds by an expansion modifier.

use super::descriptor::{ExpansionMode, Increments};

/// Floating-point noise, in ulps of the bound, still treated as sitting on a multiple
const ALIGN_ULPS: f64 = 4.0;

/// Minimum padding `+e` guarantees, as a fraction of the increment
const MIN_PAD_FRACTION: f64 = 0.25;

/// Expand `[west, east, south, north]` outward according to `mode`.
///
/// Minimum bounds move down and maximum bounds move up, each by its own
/// increment. Increments are assumed positive.
pub fn expand_bounds(bounds: [f64; 4], mode: ExpansionMode, increments: &Increments) -> [f64; 4] {
    let [west, east, south, north] = bounds;
    [
        expand_min(west, increments.west, mode),
        expand_max(east, increments.east, mode),
        expand_min(south, increments.south, mode),
        expand_max(north, increments.north, mode),
    ]
}

fn expand_min(value: f64, inc: f64, mode: ExpansionMode) -> f64 {
    match mode {
        ExpansionMode::Unrounded => value - inc,
        ExpansionMode::RoundedAll => snap(value, inc, f64::floor),
        ExpansionMode::RoundedAsymmetric => {
            let rounded = snap(value, inc, f64::floor);
            if value - rounded < MIN_PAD_FRACTION * inc {
                rounded - inc
            } else {
                rounded
            }
        }
    }
}

fn expand_max(value: f64, inc: f64, mode: ExpansionMode) -> f64 {
    match mode {
        ExpansionMode::Unrounded => value + inc,
        ExpansionMode::RoundedAll => snap(value, inc, f64::ceil),
        ExpansionMode::RoundedAsymmetric => {
            let rounded = snap(value, inc, f64::ceil);
            if rounded - value < MIN_PAD_FRACTION * inc {
                rounded + inc
            } else {
                rounded
            }
        }
    }
}

/// Round `value` to a multiple of `inc` with `round` (floor or ceil).
///
/// A value that differs from a multiple only by floating-point noise is kept
/// on that multiple, so `0.3` stays `0.3` for an increment of `0.1`. Any real
/// offset, however small relative to `inc`, still rounds outward.
fn snap(value: f64, inc: f64, round: fn(f64) -> f64) -> f64 {
    let steps = value / inc;
    let nearest = steps.round() * inc;
    if (nearest - value).abs() <= ALIGN_ULPS * f64::EPSILON * value.abs().max(1.0) {
        nearest
    } else {
        round(steps) * inc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(inc: f64) -> Increments {
        Increments::from_values(&[inc]).unwrap()
    }

    #[test]
    fn test_rounded_all() {
        let out = expand_bounds(
            [11.0, 19.0, 36.0, 44.0],
            ExpansionMode::RoundedAll,
            &uniform(5.0),
        );
        assert_eq!(out, [10.0, 20.0, 35.0, 45.0]);

        // Already aligned bounds are left alone
        let out = expand_bounds(
            [10.0, 20.0, 35.0, 45.0],
            ExpansionMode::RoundedAll,
            &uniform(5.0),
        );
        assert_eq!(out, [10.0, 20.0, 35.0, 45.0]);

        // Negative bounds round away from the box, not toward zero
        let out = expand_bounds(
            [-11.0, -1.0, -44.0, -36.0],
            ExpansionMode::RoundedAll,
            &uniform(5.0),
        );
        assert_eq!(out, [-15.0, 0.0, -45.0, -35.0]);
    }

    #[test]
    fn test_rounded_all_decimal_increment() {
        let out = expand_bounds([0.3, 0.7, 0.1, 0.9], ExpansionMode::RoundedAll, &uniform(0.1));
        for (actual, expected) in out.iter().zip([0.3, 0.7, 0.1, 0.9]) {
            assert!((actual - expected).abs() < 1e-12, "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_rounded_all_tiny_offsets_round_outward() {
        // Just past a multiple is not aligned
        let out = expand_bounds(
            [0.0, 10.000000001, 0.0, 1.0],
            ExpansionMode::RoundedAll,
            &uniform(10.0),
        );
        assert_eq!(out, [0.0, 20.0, 0.0, 10.0]);

        // A sliver far smaller than the increment still gets a full cell
        let out = expand_bounds(
            [0.0, 0.000005, 0.0, 1.0],
            ExpansionMode::RoundedAll,
            &uniform(10000.0),
        );
        assert_eq!(out, [0.0, 10000.0, 0.0, 10000.0]);

        let out = expand_bounds(
            [-0.000005, 0.0, -1.0, 0.0],
            ExpansionMode::RoundedAll,
            &uniform(10000.0),
        );
        assert_eq!(out, [-10000.0, 0.0, -10000.0, 0.0]);
    }

    #[test]
    fn test_per_side_increments() {
        let incs = Increments::from_values(&[3.0, 5.0, 7.0, 9.0]).unwrap();
        let out = expand_bounds([122.9, 154.0, 20.4, 45.6], ExpansionMode::RoundedAll, &incs);
        assert_eq!(out, [120.0, 155.0, 14.0, 54.0]);
    }

    #[test]
    fn test_unrounded() {
        let out = expand_bounds(
            [122.9, 154.0, 20.4, 45.6],
            ExpansionMode::Unrounded,
            &uniform(3.0),
        );
        let expected = [119.9, 157.0, 17.4, 48.6];
        for (actual, expected) in out.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_rounded_asymmetric_minimum_padding() {
        // Plain rounding would add only 0.5 on each side, below 0.25 * 4
        let out = expand_bounds(
            [8.5, 11.5, 0.5, 3.5],
            ExpansionMode::RoundedAsymmetric,
            &uniform(4.0),
        );
        assert_eq!(out, [4.0, 16.0, -4.0, 8.0]);

        // Enough padding already, same as +r
        let out = expand_bounds(
            [9.0, 18.0, 37.0, 43.0],
            ExpansionMode::RoundedAsymmetric,
            &uniform(5.0),
        );
        assert_eq!(out, [5.0, 20.0, 35.0, 45.0]);

        // Aligned bounds always move one increment out
        let out = expand_bounds(
            [10.0, 20.0, 35.0, 45.0],
            ExpansionMode::RoundedAsymmetric,
            &uniform(5.0),
        );
        assert_eq!(out, [5.0, 25.0, 30.0, 50.0]);
    }

    #[test]
    fn test_rounded_asymmetric_padding_bound() {
        let inc = 3.0;
        for i in 0..200 {
            let value = -50.0 + i as f64 * 0.37;
            let [w, e, s, n] = expand_bounds(
                [value, value + 1.0, value, value + 1.0],
                ExpansionMode::RoundedAsymmetric,
                &uniform(inc),
            );
            assert!(value - w >= 0.25 * inc - 1e-9);
            assert!(e - (value + 1.0) >= 0.25 * inc - 1e-9);
            assert!(value - s >= 0.25 * inc - 1e-9);
            assert!(n - (value + 1.0) >= 0.25 * inc - 1e-9);
        }
    }
}
