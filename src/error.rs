//! Error types for atombloom operations.
//!
//! Only two kinds of failure ever reach a caller:
//!
//! - merging filters whose `m` or `k` differ
//! - decoding a malformed serialized filter or bit set
//!
//! Degenerate constructor arguments are clamped and out-of-range bit indices
//! are silent no-ops, so neither shows up here.
//!
//! # Error Propagation
//!
//! ```
//! use atombloom::{BloomFilter, Result};
//!
//! fn combine(a: &BloomFilter, b: &BloomFilter) -> Result<usize> {
//!     a.merge(b)?;
//!     Ok(a.count_set_bits())
//! }
//! # let a = BloomFilter::new(1000, 4);
//! # let b = BloomFilter::new(1000, 4);
//! # assert!(combine(&a, &b).is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for atombloom operations.
pub type Result<T> = std::result::Result<T, BloomError>;

/// Errors that can occur during Bloom filter operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BloomError {
    /// Two filters or bit sets cannot be combined.
    ///
    /// Raised by merge/union when the bit count, hash count or word count
    /// differ. The receiving structure is left untouched.
    IncompatibleFilters {
        /// Description of the incompatibility.
        reason: String,
    },

    /// Encoding or decoding failed.
    ///
    /// Covers truncated streams, wrongly typed fields and word counts that
    /// disagree with the declared size.
    Serialization {
        /// Description of what failed.
        message: String,
    },
}

impl fmt::Display for BloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleFilters { reason } => {
                write!(
                    f,
                    "Cannot perform operation on incompatible filters: {}.",
                    reason
                )
            }
            Self::Serialization { message } => {
                write!(f, "Serialization error: {}.", message)
            }
        }
    }
}

impl std::error::Error for BloomError {}

impl BloomError {
    /// Create an `IncompatibleFilters` error.
    #[must_use]
    pub fn incompatible_filters(reason: impl Into<String>) -> Self {
        Self::IncompatibleFilters {
            reason: reason.into(),
        }
    }

    /// Create a `Serialization` error.
    #[must_use]
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Returns `true` for merge/union parameter mismatches.
    #[must_use]
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Self::IncompatibleFilters { .. })
    }

    /// Returns `true` for decode/encode failures.
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}
