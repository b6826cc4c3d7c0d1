//! # atombloom
//!
//! A Bloom filter whose bit array is a slice of atomic 64-bit words, so any
//! number of threads can add and test keys through a shared reference with
//! no lock.
//!
//! # What is a Bloom Filter?
//!
//! A Bloom filter answers "have I seen this key?" in constant space. It can
//! return false positives (reporting a key that was never added) but never
//! false negatives. The error rate is tuned with two numbers: `m`, the
//! number of bits, and `k`, the number of bit positions probed per key.
//!
//! # Quick Start
//!
//! ```
//! use atombloom::BloomFilter;
//!
//! // Sized for 1000 keys at a 1% false positive rate
//! let filter = BloomFilter::with_estimates(1000, 0.01);
//!
//! filter.add("alpha");
//! filter.add(b"raw bytes");
//!
//! assert!(filter.test("alpha"));
//! assert!(!filter.test("beta")); // almost certainly
//! ```
//!
//! # Sharing Across Threads
//!
//! Every operation takes `&self`. Wrap the filter in an `Arc`:
//!
//! ```
//! use atombloom::BloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(BloomFilter::new(10_000, 5));
//!
//! let writer = {
//!     let filter = Arc::clone(&filter);
//!     thread::spawn(move || filter.add("from a thread"))
//! };
//! writer.join().unwrap();
//!
//! assert!(filter.test("from a thread"));
//! ```
//!
//! Multi-word operations are not linearizable as a whole; see
//! [`filters::standard`] for the exact guarantees.
//!
//! # Hashing
//!
//! Positions are derived from MurmurHash3 x64/128 with the double-hashing
//! scheme described in [`hash`]. The derivation is part of the persisted
//! format and matches other implementations using the same scheme, so
//! filters built elsewhere can be loaded and queried here.
//!
//! # Features
//!
//! - `serde` (default): `Serialize` / `Deserialize` for [`AtomicBitSet`]
//!   and [`BloomFilter`]
//! - `rayon`: parallel [`BloomFilter::add_batch`] and
//!   [`BloomFilter::test_batch`]
//! - `trace`: structured logging through `tracing`
//!
//! # Serialization
//!
//! The binary format in [`codec`] is always available:
//!
//! ```
//! use atombloom::BloomFilter;
//!
//! let filter = BloomFilter::new(512, 3);
//! filter.add("persist me");
//!
//! let mut buf = Vec::new();
//! filter.write_to(&mut buf).unwrap();
//!
//! let restored = BloomFilter::read_from(&mut buf.as_slice()).unwrap();
//! assert!(restored.test("persist me"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::len_zero)]
#![allow(clippy::bool_assert_comparison)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/atombloom/0.1.0")]

/// Atomic bit set and parameter estimation
pub mod core;

/// Error types and result aliases
pub mod error;

/// The Bloom filter and its empirical error estimator
pub mod filters;

/// MurmurHash3 and probe location derivation
pub mod hash;

/// Big-endian binary encoding
pub mod codec;

/// Serialization support (requires `serde` feature)
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde_support;

// Re-export commonly used types at crate root
pub use codec::CodecError;
pub use crate::core::{estimate_parameters, expected_false_positive_rate, AtomicBitSet};
pub use error::{BloomError, Result};
pub use filters::{estimate_false_positive_rate, BloomFilter};
pub use hash::{base_hashes, locations};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use atombloom::prelude::*;
///
/// let filter = BloomFilter::with_estimates(100, 0.01);
/// filter.add("hello");
/// assert!(filter.test("hello"));
/// ```
pub mod prelude {
    pub use crate::core::{estimate_parameters, AtomicBitSet};
    pub use crate::error::{BloomError, Result};
    pub use crate::filters::BloomFilter;
    pub use crate::hash::base_hashes;
}
