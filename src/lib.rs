//! # kbloom
//!
//! A classic Bloom filter: a fixed-size bit array probed by `k` hash functions
//! that the caller supplies at construction.
//!
//! `check` answers "definitely not present" exactly and "maybe present" with a
//! false-positive rate governed by the bit count `m`, the hash count `k` and the
//! number of inserted keys `n`. See [`utils`] for choosing `m` and `k`.
//!
//! ```
//! use kbloom::{BloomFilter, HashFunction};
//!
//! fn fold(seed: u64) -> impl Fn(&[u8]) -> u64 + Send + Sync {
//!     move |key: &[u8]| {
//!         key.iter()
//!             .fold(seed, |h, &b| (h ^ b as u64).wrapping_mul(0x100000001b3))
//!     }
//! }
//!
//! let hashes: Vec<Box<dyn HashFunction>> =
//!     vec![Box::new(fold(1)), Box::new(fold(2)), Box::new(fold(3))];
//! let mut bloom = BloomFilter::new(1024, 3, hashes)?;
//!
//! bloom.add("apple");
//! assert!(bloom.check("apple"));
//! # Ok::<(), kbloom::BloomError>(())
//! ```

pub mod bits;
pub mod bloom;
pub mod hash;
pub mod utils;

pub use bits::BitArray;
pub use bloom::{BloomFilter, BloomStats};
pub use hash::HashFunction;
pub use utils::BloomParameters;

/// Common error types for the library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloomError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Memory allocation error: {0}")]
    MemoryAllocation(String),
    #[error("Incompatible filters: {0}")]
    IncompatibleFilters(String),
}

pub type Result<T> = std::result::Result<T, BloomError>;
