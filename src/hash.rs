//! Hash functions for Bloom filters
//!
//! The filter ships no hash functions of its own. Callers hand in `k`
//! implementations of [`HashFunction`]; any `Fn(&[u8]) -> u64 + Send + Sync`
//! closure or function pointer already is one.

/// Trait for hash functions used in Bloom filters
///
/// Implementations must be deterministic: the same key hashes to the same
/// value on every call. The output does not need to be reduced; the filter
/// takes it modulo the bit count.
pub trait HashFunction: Send + Sync {
    /// Hash a key
    fn hash(&self, key: &[u8]) -> u64;

    /// Get a name/identifier for this hash function
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<F> HashFunction for F
where
    F: Fn(&[u8]) -> u64 + Send + Sync,
{
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        self(key)
    }
}
