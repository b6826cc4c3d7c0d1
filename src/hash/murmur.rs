//! MurmurHash3 x64/128.
//!
//! Streaming implementation: bytes can be fed in any number of `write`
//! calls and [`Murmur3X64128::finish128`] may be called between writes
//! without disturbing the state. [`base_hashes`](super::base_hashes) relies
//! on that to derive four values from one pass over the key.

use byteorder::{ByteOrder, LittleEndian};
use std::hash::Hasher;

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// Streaming MurmurHash3 x64/128 hasher.
#[derive(Debug, Clone)]
pub struct Murmur3X64128 {
    h1: u64,
    h2: u64,
    total: u64,
    buf: [u8; 16],
    buf_len: usize,
}

impl Murmur3X64128 {
    /// Create a hasher with the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            h1: seed,
            h2: seed,
            total: 0,
            buf: [0; 16],
            buf_len: 0,
        }
    }

    /// Hash everything written so far into two 64-bit halves.
    #[must_use]
    pub fn finish128(&self) -> (u64, u64) {
        let mut h1 = self.h1;
        let mut h2 = self.h2;
        let rem = self.buf_len;
        let total = self.total + rem as u64;

        if rem > 8 {
            let mut tail = [0u8; 8];
            tail[..rem - 8].copy_from_slice(&self.buf[8..rem]);
            h2 ^= mix_k2(LittleEndian::read_u64(&tail));
        }
        if rem > 0 {
            let mut tail = [0u8; 8];
            let len = rem.min(8);
            tail[..len].copy_from_slice(&self.buf[..len]);
            h1 ^= mix_k1(LittleEndian::read_u64(&tail));
        }

        h1 ^= total;
        h2 ^= total;
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        h1 = fmix64(h1);
        h2 = fmix64(h2);
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        (h1, h2)
    }

    #[inline]
    fn block(&mut self, k1: u64, k2: u64) {
        self.h1 ^= mix_k1(k1);
        self.h1 = self
            .h1
            .rotate_left(27)
            .wrapping_add(self.h2)
            .wrapping_mul(5)
            .wrapping_add(0x52dc_e729);

        self.h2 ^= mix_k2(k2);
        self.h2 = self
            .h2
            .rotate_left(31)
            .wrapping_add(self.h1)
            .wrapping_mul(5)
            .wrapping_add(0x3849_5ab5);

        self.total += 16;
    }
}

impl Default for Murmur3X64128 {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Hasher for Murmur3X64128 {
    fn finish(&self) -> u64 {
        self.finish128().0
    }

    fn write(&mut self, mut bytes: &[u8]) {
        if self.buf_len + bytes.len() < 16 {
            self.buf[self.buf_len..self.buf_len + bytes.len()].copy_from_slice(bytes);
            self.buf_len += bytes.len();
            return;
        }

        if self.buf_len != 0 {
            let wanted = 16 - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&bytes[..wanted]);
            let k1 = LittleEndian::read_u64(&self.buf[..8]);
            let k2 = LittleEndian::read_u64(&self.buf[8..]);
            self.block(k1, k2);
            bytes = &bytes[wanted..];
            self.buf_len = 0;
        }

        let mut chunks = bytes.chunks_exact(16);
        for chunk in &mut chunks {
            let k1 = LittleEndian::read_u64(&chunk[..8]);
            let k2 = LittleEndian::read_u64(&chunk[8..]);
            self.block(k1, k2);
        }

        let rest = chunks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.buf_len = rest.len();
    }
}

#[inline]
fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^ (k >> 33)
}
