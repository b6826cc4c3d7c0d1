//! Reading and writing the big-endian wire format.
//!
//! Writers report the number of bytes produced. Readers consume exactly one
//! encoded value and leave the rest of the stream untouched.

use super::CodecError;
use crate::core::bitset::{words_for, AtomicBitSet};
use crate::error::Result;
use crate::filters::standard::BloomFilter;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Words reserved up front while decoding; the rest grows as data arrives.
const PREALLOCATED_WORDS: usize = 1 << 16;

/// Encoded size of a bit set with `words` words.
const fn bitset_encoded_len(words: usize) -> usize {
    16 + words * 8
}

fn write_u64<W: Write>(writer: &mut W, field: &'static str, value: u64) -> Result<()> {
    writer
        .write_u64::<BigEndian>(value)
        .map_err(|e| CodecError::write(field, e).into())
}

fn read_u64<R: Read>(reader: &mut R, field: &'static str) -> Result<u64> {
    reader
        .read_u64::<BigEndian>()
        .map_err(|e| CodecError::read(field, e).into())
}

fn to_usize(field: &'static str, value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| CodecError::InvalidParameter { field, value }.into())
}

impl AtomicBitSet {
    /// Write `size`, word count and every word, big-endian.
    ///
    /// Words are loaded one at a time; concurrent writers may or may not be
    /// reflected in the output.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::Serialization`](crate::BloomError::Serialization)
    /// if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        write_u64(writer, "bit set size", self.len() as u64)?;
        write_u64(writer, "word count", self.num_words() as u64)?;
        for word in self.iter_words() {
            write_u64(writer, "bit set word", word)?;
        }
        Ok(bitset_encoded_len(self.num_words()) as u64)
    }

    /// Read a bit set written by [`AtomicBitSet::write_to`].
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::Serialization`](crate::BloomError::Serialization)
    /// on truncated input or when the word count is not `⌈size / 64⌉`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let size = read_u64(reader, "bit set size")?;
        let words = read_u64(reader, "word count")?;

        let size_usize = to_usize("bit set size", size)?;
        let expected = words_for(size_usize) as u64;
        if words != expected {
            return Err(CodecError::WordCountMismatch {
                size,
                words,
                expected,
            }
            .into());
        }

        let count = to_usize("word count", words)?;
        let mut data = Vec::with_capacity(count.min(PREALLOCATED_WORDS));
        for _ in 0..count {
            data.push(read_u64(reader, "bit set word")?);
        }

        Ok(Self::from_raw_words(data, size_usize))
    }
}

impl BloomFilter {
    /// Write `m`, `k` and the bit set, big-endian.
    ///
    /// Returns the number of bytes written. The bit set is read word by
    /// word, so quiesce writers first if the output must be a single
    /// consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::Serialization`](crate::BloomError::Serialization)
    /// if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        write_u64(writer, "m", self.size() as u64)?;
        write_u64(writer, "k", self.hash_count() as u64)?;
        let body = self.bit_set().write_to(writer)?;
        Ok(16 + body)
    }

    /// Read one filter written by [`BloomFilter::write_to`].
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::Serialization`](crate::BloomError::Serialization)
    /// on truncated input, `m == 0`, `k == 0`, a word count inconsistent
    /// with the bit-set size, or a bit-set size different from `m`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let m = read_u64(reader, "m")?;
        let k = read_u64(reader, "k")?;

        if m == 0 {
            return Err(CodecError::InvalidParameter { field: "m", value: m }.into());
        }
        if k == 0 {
            return Err(CodecError::InvalidParameter { field: "k", value: k }.into());
        }
        let m_usize = to_usize("m", m)?;
        let k_usize = to_usize("k", k)?;

        let size = read_u64(reader, "bit set size")?;
        if size != m {
            return Err(CodecError::SizeMismatch { m, size }.into());
        }

        let words = read_u64(reader, "word count")?;
        let expected = words_for(m_usize) as u64;
        if words != expected {
            return Err(CodecError::WordCountMismatch {
                size,
                words,
                expected,
            }
            .into());
        }

        let mut data = Vec::with_capacity(words_for(m_usize).min(PREALLOCATED_WORDS));
        for _ in 0..expected {
            data.push(read_u64(reader, "bit set word")?);
        }

        #[cfg(feature = "trace")]
        tracing::debug!(m, k, words, "decoded bloom filter");

        Ok(Self::from_parts(
            AtomicBitSet::from_raw_words(data, m_usize),
            k_usize,
        ))
    }

    /// Encode into a freshly allocated buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(16 + bitset_encoded_len(self.bit_set().num_words()));
        // writes into a Vec never fail
        let written = self.write_to(&mut buf);
        debug_assert!(matches!(written, Ok(n) if n as usize == buf.len()));
        buf
    }

    /// Decode a buffer holding exactly one encoded filter.
    ///
    /// # Errors
    ///
    /// Everything [`BloomFilter::read_from`] rejects, plus trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        let filter = Self::read_from(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(CodecError::TrailingBytes {
                count: cursor.len(),
            }
            .into());
        }
        Ok(filter)
    }
}
