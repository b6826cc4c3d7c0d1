//! Key hashing and probe location derivation.
//!
//! Every key is hashed once into four 64-bit base values, and the `k` probe
//! positions are linear combinations of those four values
//! (Kirsch & Mitzenmacher, "Less Hashing, Same Performance"):
//!
//! ```text
//! location(h, i) = h[i % 2] + i × h[2 + ((i + i % 2) % 4) / 2]     (mod 2⁶⁴)
//! index(h, i)    = location(h, i) mod m
//! ```
//!
//! The base values come from MurmurHash3 x64/128 with seed 0:
//!
//! ```text
//! (h0, h1) = murmur3(key)
//! (h2, h3) = murmur3(key ++ [0x01])
//! ```
//!
//! Both formulas are part of the persisted format: a serialized filter is
//! only meaningful to code that derives the same positions for the same
//! key, so neither may change.

pub mod murmur;

pub use murmur::Murmur3X64128;

use std::hash::Hasher;

/// Compute the four base hash values of `data`.
///
/// Use together with [`BloomFilter::add_hash`](crate::BloomFilter::add_hash)
/// and [`BloomFilter::test_hash`](crate::BloomFilter::test_hash) to hash a
/// key once and probe many filters with it.
///
/// ```
/// use atombloom::hash::base_hashes;
///
/// assert_eq!(base_hashes(b"alpha"), base_hashes(b"alpha"));
/// assert_ne!(base_hashes(b"alpha"), base_hashes(b"beta"));
/// ```
#[must_use]
pub fn base_hashes(data: &[u8]) -> [u64; 4] {
    let mut hasher = Murmur3X64128::with_seed(0);
    hasher.write(data);
    let (h0, h1) = hasher.finish128();
    hasher.write(&[1]);
    let (h2, h3) = hasher.finish128();
    [h0, h1, h2, h3]
}

/// The `i`-th raw (pre-modulo) probe location for base hashes `h`.
#[must_use]
#[inline]
pub fn location(h: &[u64; 4], i: u64) -> u64 {
    let pair = 2 + (((i + (i % 2)) % 4) / 2) as usize;
    h[(i % 2) as usize].wrapping_add(i.wrapping_mul(h[pair]))
}

/// The first `k` raw probe locations of `data`.
///
/// The values are independent of any filter size: reduce them modulo `m`
/// (or hand them to
/// [`BloomFilter::test_locations`](crate::BloomFilter::test_locations)) to
/// probe filters of different sizes without rehashing.
///
/// ```
/// use atombloom::{locations, BloomFilter};
///
/// let filter = BloomFilter::new(1000, 4);
/// filter.add("alpha");
///
/// let locs = locations(b"alpha", 4);
/// assert_eq!(locs.len(), 4);
/// assert!(filter.test_locations(&locs));
/// ```
#[must_use]
pub fn locations(data: &[u8], k: usize) -> Vec<u64> {
    let h = base_hashes(data);
    (0..k as u64).map(|i| location(&h, i)).collect()
}
