//! Core building blocks shared by the filter.
//!
//! ```text
//! core/
//! ├── bitset.rs    - lock-free atomic bit set
//! ├── params.rs    - (m, k) sizing and theoretical error rate
//! └── mod.rs       - this file
//! ```

pub mod bitset;
pub mod params;

pub use bitset::AtomicBitSet;
pub use params::{estimate_parameters, expected_false_positive_rate};
