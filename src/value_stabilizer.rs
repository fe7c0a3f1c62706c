// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

pub const DEFAULT_DECIMALS: usize = 4;

/// Rounds `value` to `decimals` places by formatting and re-parsing it.
/// This collapses floating point noise, so repeated near-identical inputs
/// (e.g. successive pointer moves) do not flicker between adjacent whole
/// units in downstream integer formatting. Idempotent.
pub fn stabilize(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stabilize_rounds() {
        assert_eq!(stabilize(1.23456789, 4), 1.2346);
        assert_eq!(stabilize(1.23456789, 2), 1.23);
        assert_eq!(stabilize(-0.00004, 4), 0.0);
        assert_eq!(stabilize(359.99999, 4), 360.0);
        assert_eq!(stabilize(2.0, DEFAULT_DECIMALS), 2.0);
    }

    #[test]
    fn test_stabilize_collapses_noise() {
        let a = 0.1 + 0.2;
        let b = 0.3;
        assert_ne!(a, b);
        assert_eq!(stabilize(a, DEFAULT_DECIMALS), stabilize(b, DEFAULT_DECIMALS));
    }

    #[test]
    fn test_stabilize_idempotent() {
        let mut x = -1000.0;
        while x < 1000.0 {
            for decimals in [0, 1, 4, 8] {
                let once = stabilize(x, decimals);
                assert_eq!(stabilize(once, decimals), once, "x={} d={}", x, decimals);
            }
            x += 0.7318;
        }
    }

    #[test]
    fn test_stabilize_non_finite() {
        assert!(stabilize(f64::NAN, 4).is_nan());
        assert_eq!(stabilize(f64::INFINITY, 4), f64::INFINITY);
    }
} // mod tests.
