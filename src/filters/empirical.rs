//! Empirical false positive measurement.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use crate::filters::standard::BloomFilter;

/// Number of absent keys probed by [`estimate_false_positive_rate`].
pub const FALSE_POSITIVE_ROUNDS: u32 = 100_000;

/// Measure the false positive rate of an `m`-bit, `k`-probe filter holding
/// `n` keys.
///
/// Builds a scratch filter, adds the 4-byte big-endian encodings of
/// `0..n`, then probes [`FALSE_POSITIVE_ROUNDS`] consecutive integers
/// starting at `n + 1` and returns the fraction reported present.
///
/// This costs `n + 100_000` hash computations. It is a measurement tool,
/// not something to call on a hot path.
///
/// ```
/// use atombloom::{estimate_false_positive_rate, estimate_parameters};
///
/// let (m, k) = estimate_parameters(1000, 0.01);
/// let rate = estimate_false_positive_rate(m, k, 1000);
/// assert!(rate < 0.02);
/// ```
#[must_use]
pub fn estimate_false_positive_rate(m: usize, k: usize, n: usize) -> f64 {
    let filter = BloomFilter::new(m, k);
    let n = n as u32;

    for i in 0..n {
        filter.add(i.to_be_bytes());
    }

    let false_positives = (0..FALSE_POSITIVE_ROUNDS)
        .filter(|&i| filter.test(i.wrapping_add(n).wrapping_add(1).to_be_bytes()))
        .count();

    false_positives as f64 / f64::from(FALSE_POSITIVE_ROUNDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::estimate_parameters;

    #[test]
    fn test_empty_filter_has_no_false_positives() {
        assert_eq!(estimate_false_positive_rate(1000, 4, 0), 0.0);
    }

    #[test]
    fn test_tiny_filter_saturates() {
        assert_eq!(estimate_false_positive_rate(1, 1, 10), 1.0);
    }

    #[test]
    fn test_one_percent_target() {
        let (m, k) = estimate_parameters(1000, 0.01);
        let rate = estimate_false_positive_rate(m, k, 1000);
        assert!(rate > 0.002 && rate < 0.02, "rate {}", rate);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            estimate_false_positive_rate(5000, 3, 700),
            estimate_false_positive_rate(5000, 3, 700)
        );
    }
}
