//! Serde representation of bit sets and filters.
//!
//! # Format
//!
//! ```text
//! AtomicBitSet := { "size": u64, "data": [i64; ⌈size / 64⌉] }
//! BloomFilter  := { "m": u64, "k": u64, "b": AtomicBitSet }
//! ```
//!
//! Words are carried as signed 64-bit integers so the JSON form matches
//! other implementations that store the bit array as `[]int64`. The bit
//! pattern is preserved exactly; only the integer interpretation differs.
//!
//! Deserialization rejects a word count other than `⌈size / 64⌉`, zero `m`
//! or `k`, and a bit-set size that differs from `m`.
//!
//! # Examples
//!
//! ## JSON
//!
//! ```
//! use atombloom::BloomFilter;
//!
//! let filter = BloomFilter::new(128, 3);
//! filter.add("hello");
//!
//! let json = serde_json::to_string(&filter).unwrap();
//! assert!(json.starts_with(r#"{"m":128,"k":3,"b":{"size":128,"data":["#));
//!
//! let restored: BloomFilter = serde_json::from_str(&json).unwrap();
//! assert!(restored.test("hello"));
//! ```
//!
//! ## Bincode
//!
//! ```
//! use atombloom::BloomFilter;
//!
//! let filter = BloomFilter::with_estimates(1000, 0.01);
//! for i in 0..1000u32 {
//!     filter.add(i.to_be_bytes());
//! }
//!
//! let bytes = bincode::serialize(&filter).unwrap();
//! let restored: BloomFilter = bincode::deserialize(&bytes).unwrap();
//! assert_eq!(filter, restored);
//! ```

use crate::core::bitset::{words_for, AtomicBitSet};
use crate::filters::standard::BloomFilter;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializable representation of an [`AtomicBitSet`].
#[derive(Serialize, Deserialize)]
struct BitSetSerde {
    /// Bit count
    size: u64,
    /// Words reinterpreted as signed integers
    data: Vec<i64>,
}

impl BitSetSerde {
    fn from_bits(bits: &AtomicBitSet) -> Self {
        Self {
            size: bits.len() as u64,
            data: bits.iter_words().map(|w| w as i64).collect(),
        }
    }

    fn into_bits<E: de::Error>(self) -> Result<AtomicBitSet, E> {
        let size = usize::try_from(self.size)
            .map_err(|_| E::custom(format!("bit set size {} does not fit in memory", self.size)))?;

        let expected = words_for(size);
        if self.data.len() != expected {
            return Err(E::custom(format!(
                "bit set of {} bits needs {} words, got {}",
                size,
                expected,
                self.data.len()
            )));
        }

        let words = self.data.into_iter().map(|w| w as u64).collect();
        Ok(AtomicBitSet::from_raw_words(words, size))
    }
}

/// Serializable representation of a [`BloomFilter`].
#[derive(Serialize, Deserialize)]
struct BloomFilterSerde {
    /// Filter size in bits
    m: u64,
    /// Number of probes
    k: u64,
    /// Bit array
    b: BitSetSerde,
}

impl Serialize for AtomicBitSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BitSetSerde::from_bits(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AtomicBitSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        BitSetSerde::deserialize(deserializer)?.into_bits()
    }
}

impl Serialize for BloomFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BloomFilterSerde {
            m: self.size() as u64,
            k: self.hash_count() as u64,
            b: BitSetSerde::from_bits(self.bit_set()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BloomFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = BloomFilterSerde::deserialize(deserializer)?;

        if repr.m == 0 {
            return Err(de::Error::custom("Invalid filter size: 0"));
        }
        if repr.k == 0 {
            return Err(de::Error::custom("Invalid hash count: 0"));
        }
        if repr.b.size != repr.m {
            return Err(de::Error::custom(format!(
                "filter declares m = {} but its bit set holds {} bits",
                repr.m, repr.b.size
            )));
        }

        let k = usize::try_from(repr.k)
            .map_err(|_| de::Error::custom(format!("Invalid hash count: {}", repr.k)))?;
        let bits = repr.b.into_bits()?;

        #[cfg(feature = "trace")]
        tracing::debug!(m = bits.len(), k, "deserialized bloom filter");

        Ok(BloomFilter::from_parts(bits, k))
    }
}
