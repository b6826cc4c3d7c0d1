//! Lock-free bit set with atomic operations.
//!
//! `AtomicBitSet` is a fixed-length bit array backed by `Box<[AtomicU64]>`.
//! Every word is only ever touched through atomic load, store and fetch-or,
//! so any number of threads may set and test bits with `&self` and no lock.
//!
//! # Memory Ordering
//!
//! - `set` / `test_and_set` use `AcqRel` fetch-or
//! - `test` / `count` use `Acquire` loads
//! - `clear_all` uses `Release` stores
//!
//! A set that is visible to a later test of the same word (from any thread)
//! is observed as set. There is no cross-word atomicity: `count`, `union`,
//! equality, cloning, serialization and `clear_all` walk the words one at a
//! time and may see a mix of states when writers run concurrently.
//!
//! # Memory Layout
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! Bit `i` lives in `words[i / 64]` under mask `1 << (i % 64)`.
//!
//! # Out-of-range indices
//!
//! Indices `>= len()` never panic: `set` ignores them and `test` reports
//! `false`. Callers reduce their indices modulo the size and never need a
//! bounds check of their own.
//!
//! # Examples
//!
//! ```
//! use atombloom::core::AtomicBitSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let bits = Arc::new(AtomicBitSet::new(1000));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let bits = Arc::clone(&bits);
//!         thread::spawn(move || {
//!             for j in 0..250 {
//!                 bits.set(i * 250 + j);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(bits.count(), 1000);
//! ```

use crate::error::{BloomError, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of 64-bit words needed to hold `bits` bits.
#[inline]
pub(crate) const fn words_for(bits: usize) -> usize {
    bits / 64 + (bits % 64 != 0) as usize
}

#[inline]
const fn locate(index: usize) -> (usize, u64) {
    (index / 64, 1u64 << (index % 64))
}

/// Fixed-size bit array whose words are manipulated only atomically.
#[derive(Debug)]
pub struct AtomicBitSet {
    words: Box<[AtomicU64]>,
    size: usize,
}

impl AtomicBitSet {
    /// Create a zeroed bit set holding `size` bits.
    ///
    /// Allocates `⌈size / 64⌉` words. A size of zero is valid and allocates
    /// no words at all.
    ///
    /// ```
    /// use atombloom::core::AtomicBitSet;
    ///
    /// let bits = AtomicBitSet::new(100);
    /// assert_eq!(bits.len(), 100);
    /// assert_eq!(bits.num_words(), 2);
    /// assert_eq!(bits.count(), 0);
    /// ```
    #[must_use]
    pub fn new(size: usize) -> Self {
        let words = (0..words_for(size))
            .map(|_| AtomicU64::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { words, size }
    }

    /// Hydrate a bit set of `size` bits from externally supplied words.
    ///
    /// Exactly `⌈size / 64⌉` words are allocated. Supplied words beyond that
    /// are ignored; missing words stay zero.
    ///
    /// ```
    /// use atombloom::core::AtomicBitSet;
    ///
    /// let bits = AtomicBitSet::from_words(&[0b101, 0xFF, 0xFF], 64);
    /// assert_eq!(bits.num_words(), 1);
    /// assert!(bits.test(0));
    /// assert!(!bits.test(1));
    /// assert!(bits.test(2));
    /// ```
    #[must_use]
    pub fn from_words(words: &[u64], size: usize) -> Self {
        let bits = Self::new(size);
        for (slot, &value) in bits.words.iter().zip(words) {
            slot.store(value, Ordering::Relaxed);
        }
        bits
    }

    /// Take ownership of an already validated word vector.
    ///
    /// The caller guarantees `words.len() == ⌈size / 64⌉`.
    pub(crate) fn from_raw_words(words: Vec<u64>, size: usize) -> Self {
        debug_assert_eq!(words.len(), words_for(size));
        let words = words
            .into_iter()
            .map(AtomicU64::new)
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { words, size }
    }

    /// Number of logical bits.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the set holds zero bits.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of 64-bit words backing the set.
    #[must_use]
    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Set bit `index`. Indices `>= len()` are ignored.
    #[inline]
    pub fn set(&self, index: usize) {
        if index >= self.size {
            return;
        }
        let (word, mask) = locate(index);
        self.words[word].fetch_or(mask, Ordering::AcqRel);
    }

    /// Test bit `index`. Indices `>= len()` report `false`.
    #[must_use]
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        if index >= self.size {
            return false;
        }
        let (word, mask) = locate(index);
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    /// Set bit `index` and return whether it was already set.
    ///
    /// One fetch-or, so the returned state is exactly the state this call
    /// overwrote. Indices `>= len()` are ignored and report `false`.
    ///
    /// ```
    /// use atombloom::core::AtomicBitSet;
    ///
    /// let bits = AtomicBitSet::new(64);
    /// assert!(!bits.test_and_set(7));
    /// assert!(bits.test_and_set(7));
    /// ```
    #[inline]
    pub fn test_and_set(&self, index: usize) -> bool {
        if index >= self.size {
            return false;
        }
        let (word, mask) = locate(index);
        self.words[word].fetch_or(mask, Ordering::AcqRel) & mask != 0
    }

    /// Store zero into every word.
    ///
    /// Best effort under concurrency: a `set` racing with this call may
    /// land before or after its word is cleared.
    pub fn clear_all(&self) {
        for word in self.words.iter() {
            word.store(0, Ordering::Release);
        }
    }

    /// Number of set bits, summed over independently loaded words.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// OR every word of `other` into `self`.
    ///
    /// Per word, not transactional across words.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::IncompatibleFilters`] if the word counts differ;
    /// `self` is not modified in that case.
    pub fn union_in_place(&self, other: &Self) -> Result<()> {
        if self.words.len() != other.words.len() {
            return Err(BloomError::incompatible_filters(format!(
                "word counts don't match: {} != {}",
                self.words.len(),
                other.words.len()
            )));
        }

        for (word, theirs) in self.words.iter().zip(other.words.iter()) {
            word.fetch_or(theirs.load(Ordering::Acquire), Ordering::AcqRel);
        }
        Ok(())
    }

    /// Per-word snapshot of the current contents.
    #[must_use]
    pub fn to_words(&self) -> Vec<u64> {
        self.iter_words().collect()
    }

    /// Iterate over the words, loading each one as it is reached.
    pub fn iter_words(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.words.iter().map(|word| word.load(Ordering::Acquire))
    }
}

impl Clone for AtomicBitSet {
    /// Copy the set word by word into an independently owned allocation.
    fn clone(&self) -> Self {
        let words = self
            .words
            .iter()
            .map(|word| AtomicU64::new(word.load(Ordering::Acquire)))
            .collect();

        Self {
            words,
            size: self.size,
        }
    }
}

impl PartialEq for AtomicBitSet {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.words.len() == other.words.len()
            && self.iter_words().eq(other.iter_words())
    }
}

impl Eq for AtomicBitSet {}
