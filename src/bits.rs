//! Fixed-length bit array backing the filter
//!
//! Bits are packed into `u64` words. The word buffer is reserved once with
//! `try_reserve_exact` and is the only allocation, so an allocator refusal
//! always comes back as an error.

use crate::{BloomError, Result};

const WORD_BITS: usize = 64;

/// A packed, fixed-length array of bits, all initially unset
///
/// Bits past `len` in the last word are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    words: Vec<u64>,
    len: usize,
}

impl BitArray {
    /// Allocate `len` zeroed bits
    ///
    /// Storage is reserved with `try_reserve_exact`, so an allocator refusal
    /// surfaces as [`BloomError::MemoryAllocation`] rather than an abort.
    pub fn zeroed(len: usize) -> Result<Self> {
        let word_count = len.div_ceil(WORD_BITS);

        let mut words: Vec<u64> = Vec::new();
        words.try_reserve_exact(word_count).map_err(|e| {
            BloomError::MemoryAllocation(format!(
                "bit array of {} bits ({} bytes): {}",
                len,
                word_count.saturating_mul(8),
                e
            ))
        })?;
        words.resize(word_count, 0);

        Ok(BitArray { words, len })
    }

    #[inline]
    fn locate(index: usize) -> (usize, u64) {
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }

    /// Set the bit at `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {} out of range {}", index, self.len);
        let (word, mask) = Self::locate(index);
        self.words[word] |= mask;
    }

    /// Read the bit at `index`; `None` when out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        let (word, mask) = Self::locate(index);
        Some(self.words[word] & mask != 0)
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the array holds zero bits (see [`none`](Self::none) for "no bit set")
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when no bit is set
    pub fn none(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Bitwise OR `other` into `self`. Lengths must match.
    pub fn or_assign(&mut self, other: &BitArray) -> Result<()> {
        self.check_len(other)?;
        for (ours, theirs) in self.words.iter_mut().zip(&other.words) {
            *ours |= theirs;
        }
        Ok(())
    }

    /// Bitwise AND of `self` and `other` as a new array. Lengths must match.
    pub fn and(&self, other: &BitArray) -> Result<BitArray> {
        self.check_len(other)?;
        let mut result = BitArray::zeroed(self.len)?;
        for ((out, ours), theirs) in result.words.iter_mut().zip(&self.words).zip(&other.words) {
            *out = ours & theirs;
        }
        Ok(result)
    }

    /// Iterate over the bits in index order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| {
            let (word, mask) = Self::locate(i);
            self.words[word] & mask != 0
        })
    }

    fn check_len(&self, other: &BitArray) -> Result<()> {
        if self.len() != other.len() {
            return Err(BloomError::IncompatibleFilters(format!(
                "bit array lengths differ: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }
}
