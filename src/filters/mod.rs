//! Bloom filter implementation and measurement helpers.
//!
//! - [`standard`] - the lock-free [`BloomFilter`]
//! - [`empirical`] - [`estimate_false_positive_rate`]

pub mod empirical;
pub mod standard;

pub use empirical::estimate_false_positive_rate;
pub use standard::BloomFilter;
