//! Standard Bloom filter implementation
//!
//! A space-efficient probabilistic data structure for membership testing.
//! Keys can be added but never removed: every bit a key sets stays set for
//! the lifetime of the filter, so a positive answer never turns negative.

use crate::{bits::BitArray, hash::HashFunction, BloomError, Result};
use std::fmt;
use tracing::{debug, trace};

/// A standard Bloom filter
pub struct BloomFilter {
    /// Bit array storing the filter data
    bits: BitArray,
    /// Hash functions used for this filter, in probe order
    hash_functions: Vec<Box<dyn HashFunction>>,
}

impl BloomFilter {
    /// Create a new Bloom filter
    ///
    /// # Arguments
    /// * `size` - Number of bits `m` in the filter. A power of two spreads
    ///   `hash mod m` best, but any positive size is accepted.
    /// * `num_hashes` - Number of hash functions `k`
    /// * `hash_functions` - Exactly `k` hash functions, probed in this order
    ///
    /// # Errors
    /// [`BloomError::InvalidParameter`] if `size` or `num_hashes` is zero or
    /// the list length differs from `num_hashes`;
    /// [`BloomError::MemoryAllocation`] if the bit array cannot be allocated.
    pub fn new(
        size: usize,
        num_hashes: usize,
        hash_functions: Vec<Box<dyn HashFunction>>,
    ) -> Result<Self> {
        if size == 0 {
            return Err(BloomError::InvalidParameter(
                "Bit count must be > 0".to_string(),
            ));
        }
        if num_hashes == 0 {
            return Err(BloomError::InvalidParameter(
                "Number of hashes must be > 0".to_string(),
            ));
        }
        if hash_functions.len() != num_hashes {
            return Err(BloomError::InvalidParameter(format!(
                "Expected {} hash functions, got {}",
                num_hashes,
                hash_functions.len()
            )));
        }

        let bits = BitArray::zeroed(size)?;

        debug!(
            bits = size,
            bytes = size.div_ceil(8),
            hashes = num_hashes,
            power_of_two = size.is_power_of_two(),
            "created bloom filter"
        );

        Ok(BloomFilter {
            bits,
            hash_functions,
        })
    }

    /// Create a Bloom filter taking `k` from the length of `hash_functions`
    pub fn from_hash_functions(
        size: usize,
        hash_functions: Vec<Box<dyn HashFunction>>,
    ) -> Result<Self> {
        let num_hashes = hash_functions.len();
        Self::new(size, num_hashes, hash_functions)
    }

    /// Insert a key into the filter
    ///
    /// Sets the bit `h_i(key) mod m` for every hash function. Adding the same
    /// key again changes nothing.
    pub fn add<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        let key = key.as_ref();
        let bit_count = self.bits.len() as u64;

        for hash_fn in &self.hash_functions {
            let index = hash_fn.hash(key) % bit_count;
            self.bits.set(index as usize);
        }
    }

    /// Check if a key might be in the filter
    /// Returns true if the key might be present (with possible false positives)
    /// Returns false if the key is definitely not present
    pub fn check<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        let key = key.as_ref();
        let bit_count = self.bits.len() as u64;

        for hash_fn in &self.hash_functions {
            let index = hash_fn.hash(key) % bit_count;
            if !self.bits.get(index as usize).unwrap_or(false) {
                return false;
            }
        }

        true
    }

    /// OR the bits of `other` into this filter
    ///
    /// Afterwards every key added to either filter checks positive here.
    /// Both filters must have the same size and the same hash functions.
    pub fn union_with(&mut self, other: &BloomFilter) -> Result<()> {
        self.check_compatible(other)?;
        self.bits.or_assign(&other.bits)?;
        debug!(set_bits = self.set_bits(), "merged bloom filter");
        Ok(())
    }

    /// AND the bits of both filters into a new bit array
    ///
    /// Neither filter is modified.
    pub fn intersection(&self, other: &BloomFilter) -> Result<BitArray> {
        self.check_compatible(other)?;
        let bits = self.bits.and(&other.bits)?;
        debug!(set_bits = bits.count_ones(), "intersected bloom filters");
        Ok(bits)
    }

    fn check_compatible(&self, other: &BloomFilter) -> Result<()> {
        if self.size() != other.size() {
            return Err(BloomError::IncompatibleFilters(format!(
                "sizes differ: {} vs {} bits",
                self.size(),
                other.size()
            )));
        }
        if self.num_hash_functions() != other.num_hash_functions() {
            return Err(BloomError::IncompatibleFilters(format!(
                "hash counts differ: {} vs {}",
                self.num_hash_functions(),
                other.num_hash_functions()
            )));
        }
        let names = self.hash_functions.iter().zip(&other.hash_functions);
        for (i, (ours, theirs)) in names.enumerate() {
            if ours.name() != theirs.name() {
                return Err(BloomError::IncompatibleFilters(format!(
                    "hash function {} differs: {} vs {}",
                    i,
                    ours.name(),
                    theirs.name()
                )));
            }
        }
        Ok(())
    }

    /// Get the current load factor (fraction of bits set)
    pub fn load_factor(&self) -> f64 {
        self.load_for(self.set_bits())
    }

    /// Get the estimated false positive rate
    pub fn estimated_fpr(&self) -> f64 {
        self.fpr_for(self.set_bits())
    }

    /// Estimate how many distinct keys have been added
    ///
    /// `n ≈ -(m/k) ln(1 - X/m)` with `X` set bits. A saturated filter gives
    /// `f64::INFINITY`.
    pub fn estimated_len(&self) -> f64 {
        self.len_for(self.set_bits())
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> BloomStats {
        let set_bits = self.set_bits();
        BloomStats {
            capacity: self.bits.len(),
            num_hash_functions: self.hash_functions.len(),
            set_bits,
            estimated_elements: self.len_for(set_bits),
            load_factor: self.load_for(set_bits),
            estimated_fpr: self.fpr_for(set_bits),
        }
    }

    fn load_for(&self, set_bits: usize) -> f64 {
        set_bits as f64 / self.bits.len() as f64
    }

    fn fpr_for(&self, set_bits: usize) -> f64 {
        self.load_for(set_bits).powi(self.hash_functions.len() as i32)
    }

    fn len_for(&self, set_bits: usize) -> f64 {
        let m = self.bits.len() as f64;
        let k = self.hash_functions.len() as f64;
        let set = set_bits as f64;
        if set >= m {
            return f64::INFINITY;
        }
        -(m / k) * (1.0 - set / m).ln()
    }

    /// Number of bits currently set
    pub fn set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    /// True when nothing has been added
    pub fn is_empty(&self) -> bool {
        self.bits.none()
    }

    /// Get the size (number of bits)
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Get the number of hash functions
    pub fn num_hash_functions(&self) -> usize {
        self.hash_functions.len()
    }

    /// Borrow the underlying bit array
    pub fn bit_array(&self) -> &BitArray {
        &self.bits
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.hash_functions.iter().map(|h| h.name()).collect();
        f.debug_struct("BloomFilter")
            .field("size", &self.size())
            .field("set_bits", &self.set_bits())
            .field("hash_functions", &names)
            .finish()
    }
}

impl Drop for BloomFilter {
    fn drop(&mut self) {
        trace!(
            bits = self.bits.len(),
            hashes = self.hash_functions.len(),
            "dropping bloom filter"
        );
    }
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone)]
pub struct BloomStats {
    pub capacity: usize,
    pub num_hash_functions: usize,
    pub set_bits: usize,
    pub estimated_elements: f64,
    pub load_factor: f64,
    pub estimated_fpr: f64,
}

impl fmt::Display for BloomStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "BloomFilter Stats:\n\
             - Capacity: {} bits\n\
             - Hash functions: {}\n\
             - Bits set: {}\n\
             - Estimated elements: {:.1}\n\
             - Load factor: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.capacity,
            self.num_hash_functions,
            self.set_bits,
            self.estimated_elements,
            self.load_factor,
            self.estimated_fpr
        )
    }
}
