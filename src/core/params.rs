//! Optimal parameter calculation for Bloom filters.
//!
//! Given:
//! - `n`: expected number of elements
//! - `p`: target false positive rate
//!
//! Optimal parameters:
//! - `m = ⌈-n × ln(p) / (ln 2)²⌉` (bits in filter)
//! - `k = ⌈ln 2 × m / n⌉` (number of hash functions)
//!
//! Expected false positive rate after `n` insertions:
//! - `p = (1 - e^(-kn/m))^k`
//!
//! The filter never resizes, so pick `n` conservatively.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::LN_2;

/// (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Smallest false positive rate fed into the sizing formula.
///
/// Rates at or below zero (and NaN) are raised to this value instead of
/// producing an unbounded bit count.
pub const MIN_FALSE_POSITIVE_RATE: f64 = f64::EPSILON;

/// Estimate `(m, k)` for `n` items at false positive rate `fp_rate`.
///
/// `k` is never below 1. `m` may be 0 (for `n == 0` or `fp_rate >= 1`);
/// [`BloomFilter::new`](crate::BloomFilter::new) clamps it to 1.
///
/// # Examples
///
/// ```
/// use atombloom::estimate_parameters;
///
/// let (m, k) = estimate_parameters(1000, 0.01);
/// assert_eq!(m, 9586);
/// assert_eq!(k, 7);
/// ```
#[must_use]
pub fn estimate_parameters(n: usize, fp_rate: f64) -> (usize, usize) {
    let p = if fp_rate.is_nan() || fp_rate <= 0.0 {
        MIN_FALSE_POSITIVE_RATE
    } else {
        fp_rate
    };

    let n_f64 = n as f64;
    let m = (-n_f64 * p.ln() / LN2_SQUARED).ceil().max(0.0) as usize;

    let k = if n == 0 {
        1
    } else {
        ((LN_2 * m as f64 / n_f64).ceil() as usize).max(1)
    };

    (m, k)
}

/// Theoretical false positive rate of an `m`-bit, `k`-hash filter holding
/// `n` items: `(1 - e^(-kn/m))^k`.
///
/// Returns `0.0` for `n == 0` and `1.0` for `m == 0`.
///
/// ```
/// use atombloom::core::params::expected_false_positive_rate;
///
/// let fp = expected_false_positive_rate(9586, 7, 1000);
/// assert!((fp - 0.01).abs() < 0.001);
/// ```
#[must_use]
pub fn expected_false_positive_rate(m: usize, k: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    if m == 0 {
        return 1.0;
    }

    let k_f64 = k as f64;
    let exponent = -k_f64 * n as f64 / m as f64;
    (1.0 - exponent.exp()).powf(k_f64).clamp(0.0, 1.0)
}
