//! Lock-free Bloom filter.
//!
//! [`BloomFilter`] owns one [`AtomicBitSet`] of `m` bits and probes `k`
//! positions per key. All operations take `&self`: share the filter through
//! an `Arc` and add/test from as many threads as you like without a lock.
//!
//! # Concurrency
//!
//! Each probe is one atomic operation on one word. Operations that touch
//! several words (`add`, `test`, `merge`, `clear_all`, `clone`,
//! serialization) are not linearizable as a whole:
//!
//! - a key fully added before a `test` starts is always found
//! - a `test` racing with an `add` of the same key may see some probes set
//!   and others not, and report `false`
//! - the "was present" answer of [`BloomFilter::test_and_add`] and
//!   [`BloomFilter::test_or_add`] is assembled probe by probe
//!
//! Quiesce writers yourself when you need a consistent snapshot.
//!
//! # Examples
//!
//! ```
//! use atombloom::BloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(BloomFilter::with_estimates(10_000, 0.01));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let filter = Arc::clone(&filter);
//!         thread::spawn(move || {
//!             for i in 0..1000 {
//!                 filter.add(format!("{}-{}", t, i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert!(filter.test("3-999"));
//! ```

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use crate::core::bitset::AtomicBitSet;
use crate::core::params::estimate_parameters;
use crate::error::{BloomError, Result};
use crate::hash::{base_hashes, location};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Bloom filter over byte-string keys backed by an atomic bit set.
///
/// # Thread Safety
///
/// - Add / Test / Merge / Clear: lock-free, `&self`
/// - No operation ever blocks
///
/// Two filters are equal when `m`, `k` and every bit match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Number of bits (m)
    m: usize,
    /// Number of probes per key (k)
    k: usize,
    bits: AtomicBitSet,
}

impl BloomFilter {
    /// Create an empty filter with `m` bits and `k` probes per key.
    ///
    /// Both values are raised to at least 1.
    ///
    /// ```
    /// use atombloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1000, 4);
    /// assert_eq!(filter.size(), 1000);
    /// assert_eq!(filter.hash_count(), 4);
    ///
    /// let degenerate = BloomFilter::new(0, 0);
    /// assert_eq!(degenerate.size(), 1);
    /// assert_eq!(degenerate.hash_count(), 1);
    /// ```
    #[must_use]
    pub fn new(m: usize, k: usize) -> Self {
        let m = m.max(1);
        let k = k.max(1);
        Self {
            m,
            k,
            bits: AtomicBitSet::new(m),
        }
    }

    /// Create a filter of `m` bits and `k` probes hydrated from raw words.
    ///
    /// Exactly `⌈m / 64⌉` words are used; extra words are ignored and
    /// missing ones are zero. `m` and `k` are raised to at least 1.
    #[must_use]
    pub fn from_words(words: &[u64], m: usize, k: usize) -> Self {
        let m = m.max(1);
        let k = k.max(1);
        Self {
            m,
            k,
            bits: AtomicBitSet::from_words(words, m),
        }
    }

    /// Create a filter sized to exactly `words.len() × 64` bits.
    ///
    /// ```
    /// use atombloom::BloomFilter;
    ///
    /// let filter = BloomFilter::from_word_slice(&[0, 0, 0], 4);
    /// assert_eq!(filter.size(), 192);
    /// ```
    #[must_use]
    pub fn from_word_slice(words: &[u64], k: usize) -> Self {
        Self::from_words(words, words.len().saturating_mul(64), k)
    }

    /// Assemble a filter from decoded parts. Callers validate `k >= 1` and
    /// a non-empty bit set.
    pub(crate) fn from_parts(bits: AtomicBitSet, k: usize) -> Self {
        debug_assert!(k >= 1 && !bits.is_empty());
        Self {
            m: bits.len(),
            k,
            bits,
        }
    }

    /// Create a filter sized for `n` items at false positive rate `fp_rate`.
    ///
    /// See [`estimate_parameters`] for the formulas. The filter does not
    /// grow, so choose `n` conservatively.
    ///
    /// ```
    /// use atombloom::BloomFilter;
    ///
    /// let filter = BloomFilter::with_estimates(1000, 0.01);
    /// assert_eq!(filter.size(), 9586);
    /// assert_eq!(filter.hash_count(), 7);
    /// ```
    #[must_use]
    pub fn with_estimates(n: usize, fp_rate: f64) -> Self {
        let (m, k) = estimate_parameters(n, fp_rate);

        #[cfg(feature = "trace")]
        tracing::debug!(n, fp_rate, m, k, "sizing bloom filter from estimates");

        Self::new(m, k)
    }

    /// Number of bits (m).
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.m
    }

    /// Number of probes per key (k).
    #[must_use]
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// The underlying bit set.
    #[must_use]
    pub fn bit_set(&self) -> &AtomicBitSet {
        &self.bits
    }

    /// Number of bits currently set.
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        self.bits.count()
    }

    /// Fraction of bits currently set, in `[0, 1]`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count() as f64 / self.m as f64
    }

    /// Bit index of the `i`-th probe.
    #[inline]
    fn index(&self, h: &[u64; 4], i: usize) -> usize {
        (location(h, i as u64) % self.m as u64) as usize
    }

    /// Add a key.
    ///
    /// After this returns, `test(key)` is `true` until `clear_all`.
    #[inline]
    pub fn add(&self, key: impl AsRef<[u8]>) {
        #[cfg(feature = "trace")]
        tracing::trace!("BloomFilter::add");

        self.add_hash(&base_hashes(key.as_ref()));
    }

    /// Add a key given its precomputed [`base_hashes`].
    #[inline]
    pub fn add_hash(&self, h: &[u64; 4]) {
        for i in 0..self.k {
            self.bits.set(self.index(h, i));
        }
    }

    /// Add many keys.
    ///
    /// With the `rayon` feature the keys are spread over the rayon pool; the
    /// filter needs no extra synchronization for that.
    pub fn add_batch<K>(&self, keys: &[K])
    where
        K: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "rayon")]
        keys.par_iter().for_each(|key| self.add(key));

        #[cfg(not(feature = "rayon"))]
        keys.iter().for_each(|key| self.add(key));
    }

    /// Test whether a key is probably present.
    ///
    /// `false` is definite. `true` may be a false positive.
    #[must_use]
    #[inline]
    pub fn test(&self, key: impl AsRef<[u8]>) -> bool {
        #[cfg(feature = "trace")]
        tracing::trace!("BloomFilter::test");

        self.test_hash(&base_hashes(key.as_ref()))
    }

    /// Test a key given its precomputed [`base_hashes`].
    ///
    /// Stops at the first unset probe.
    #[must_use]
    #[inline]
    pub fn test_hash(&self, h: &[u64; 4]) -> bool {
        (0..self.k).all(|i| self.bits.test(self.index(h, i)))
    }

    /// Test many keys, in order.
    #[must_use]
    #[allow(clippy::needless_return)]
    pub fn test_batch<K>(&self, keys: &[K]) -> Vec<bool>
    where
        K: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "rayon")]
        return keys.par_iter().map(|key| self.test(key)).collect();

        #[cfg(not(feature = "rayon"))]
        return keys.iter().map(|key| self.test(key)).collect();
    }

    /// Test raw locations from [`locations`](crate::hash::locations).
    ///
    /// Each value is reduced modulo `m`; all must be set.
    #[must_use]
    pub fn test_locations(&self, locs: &[u64]) -> bool {
        locs.iter()
            .all(|&loc| self.bits.test((loc % self.m as u64) as usize))
    }

    /// Return whether the key was probably present, then add it.
    ///
    /// Every probe is set regardless of the answer. Under concurrent callers
    /// the answer is built from each probe's own previous state, not from a
    /// single instant.
    ///
    /// ```
    /// use atombloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1000, 4);
    /// assert!(!filter.test_and_add("alpha"));
    /// assert!(filter.test_and_add("alpha"));
    /// ```
    pub fn test_and_add(&self, key: impl AsRef<[u8]>) -> bool {
        let h = base_hashes(key.as_ref());
        let mut present = true;
        for i in 0..self.k {
            if !self.bits.test_and_set(self.index(&h, i)) {
                present = false;
            }
        }
        present
    }

    /// Return whether the key was probably present, setting only the
    /// probes found unset.
    ///
    /// Each probe is tested and then set independently. Racing with an
    /// `add` of the same key, the answer may disagree with the multi-bit
    /// state at any single instant; the bits still end up set.
    pub fn test_or_add(&self, key: impl AsRef<[u8]>) -> bool {
        let h = base_hashes(key.as_ref());
        let mut present = true;
        for i in 0..self.k {
            let idx = self.index(&h, i);
            if !self.bits.test(idx) {
                present = false;
                self.bits.set(idx);
            }
        }
        present
    }

    /// OR the bits of `other` into this filter.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::IncompatibleFilters`] when `m` or `k` differ;
    /// this filter is left unchanged.
    ///
    /// ```
    /// use atombloom::BloomFilter;
    ///
    /// let a = BloomFilter::new(1000, 4);
    /// let b = BloomFilter::new(1000, 4);
    /// a.add("left");
    /// b.add("right");
    ///
    /// a.merge(&b).unwrap();
    /// assert!(a.test("left") && a.test("right"));
    ///
    /// assert!(a.merge(&BloomFilter::new(2000, 4)).is_err());
    /// ```
    pub fn merge(&self, other: &Self) -> Result<()> {
        if self.m != other.m {
            #[cfg(feature = "trace")]
            tracing::warn!(left = self.m, right = other.m, "refusing merge: m differs");

            return Err(BloomError::incompatible_filters(format!(
                "m's don't match: {} != {}",
                self.m, other.m
            )));
        }
        if self.k != other.k {
            #[cfg(feature = "trace")]
            tracing::warn!(left = self.k, right = other.k, "refusing merge: k differs");

            return Err(BloomError::incompatible_filters(format!(
                "k's don't match: {} != {}",
                self.k, other.k
            )));
        }

        #[cfg(feature = "trace")]
        tracing::debug!(m = self.m, k = self.k, "merging bloom filters");

        self.bits.union_in_place(&other.bits)
    }

    /// Reset every bit to zero.
    pub fn clear_all(&self) {
        #[cfg(feature = "trace")]
        tracing::debug!(m = self.m, "clearing bloom filter");

        self.bits.clear_all();
    }

    /// Estimate how many distinct keys were added.
    ///
    /// Uses `-(m / k) × ln(1 - x / m)` with `x` the number of set bits.
    /// A fully saturated filter reports `m / k`.
    ///
    /// ```
    /// use atombloom::BloomFilter;
    ///
    /// let filter = BloomFilter::with_estimates(1000, 0.01);
    /// for i in 0..500u32 {
    ///     filter.add(i.to_be_bytes());
    /// }
    /// let estimate = filter.approximated_size();
    /// assert!((450..=550).contains(&estimate));
    /// ```
    #[must_use]
    pub fn approximated_size(&self) -> u64 {
        let m = self.m as f64;
        let k = self.k as f64;
        let x = self.bits.count() as f64;

        if m == 0.0 || k == 0.0 {
            return 0;
        }
        if x >= m {
            return (m / k) as u64;
        }
        (-(m / k) * (1.0 - x / m).ln()).max(0.0) as u64
    }
}
