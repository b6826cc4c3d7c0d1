//! Binary encoding of bit sets and filters.
//!
//! # Format
//!
//! Big-endian throughout, no header or padding:
//!
//! ```text
//! BloomFilter := m:u64 || k:u64 || BitSet
//! BitSet      := size:u64 || word_count:u64 || word[0..word_count]:u64
//! ```
//!
//! `word_count` must equal `⌈size / 64⌉`, and a filter's bit-set `size`
//! must equal its `m`. Anything else is rejected before words are read.
//!
//! # Examples
//!
//! ```
//! use atombloom::BloomFilter;
//!
//! let filter = BloomFilter::new(1000, 4);
//! filter.add("alpha");
//!
//! let bytes = filter.to_bytes();
//! assert_eq!(bytes.len(), 8 + 8 + 8 + 8 + 16 * 8);
//!
//! let restored = BloomFilter::from_bytes(&bytes).unwrap();
//! assert_eq!(filter, restored);
//! ```

pub mod binary;

use crate::error::BloomError;
use std::io;

/// Failures while encoding or decoding the binary format.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input ended before a field was complete.
    #[error("Stream truncated while reading {field}")]
    Truncated {
        /// Field being read when the input ran out
        field: &'static str,
    },

    /// The underlying reader or writer failed.
    #[error("I/O failure while {context}: {source}")]
    Io {
        /// What was being read or written
        context: &'static str,
        /// Original error
        #[source]
        source: io::Error,
    },

    /// Declared word count disagrees with the declared bit count.
    #[error("Word count {words} does not match {expected} words required for {size} bits")]
    WordCountMismatch {
        /// Declared bit count
        size: u64,
        /// Declared word count
        words: u64,
        /// Word count implied by `size`
        expected: u64,
    },

    /// Filter `m` differs from the size of its bit set.
    #[error("Filter declares m = {m} but its bit set holds {size} bits")]
    SizeMismatch {
        /// Declared filter bit count
        m: u64,
        /// Declared bit-set size
        size: u64,
    },

    /// A header field holds a value the filter cannot use.
    #[error("Invalid {field}: {value}")]
    InvalidParameter {
        /// Field name
        field: &'static str,
        /// Offending value
        value: u64,
    },

    /// Bytes left over after a complete filter was decoded.
    #[error("{count} trailing bytes after encoded filter")]
    TrailingBytes {
        /// Number of unread bytes
        count: usize,
    },
}

impl CodecError {
    /// Classify a read failure, turning early EOF into `Truncated`.
    pub(crate) fn read(field: &'static str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated { field }
        } else {
            Self::Io {
                context: field,
                source: err,
            }
        }
    }

    pub(crate) fn write(field: &'static str, err: io::Error) -> Self {
        Self::Io {
            context: field,
            source: err,
        }
    }
}

impl From<CodecError> for BloomError {
    fn from(err: CodecError) -> Self {
        BloomError::serialization_error(err.to_string())
    }
}
