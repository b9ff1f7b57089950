//! Utility functions for Bloom filters
//!
//! Closed-form parameter selection. Nothing here is enforced by
//! [`BloomFilter`](crate::BloomFilter); it accepts any `m` and `k`.
//!
//! With `n` inserted keys, `m` bits and `k` hash functions the false positive
//! probability is approximately `(1 - e^(-kn/m))^k`. It is minimised at
//! `k = (m/n) ln 2`, which gives `p ≈ 0.6185^(m/n)`, and solving for `m`
//! gives `m = -n ln(p) / (ln 2)^2`.

use crate::{BloomError, Result};
use std::f64::consts::LN_2;

/// `0.5^ln(2)`: the per-bit-per-key base of the optimal false positive rate
const OPTIMAL_FPR_BASE: f64 = 0.6185;

/// Calculate optimal Bloom filter parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BloomParameters {
    pub optimal_num_bits: usize,
    pub optimal_num_hashes: usize,
    pub expected_fpr: f64,
}

fn check_fpr(p: f64) -> Result<()> {
    if !(p > 0.0 && p < 1.0) {
        return Err(BloomError::InvalidParameter(format!(
            "False positive rate must be in (0, 1), got {}",
            p
        )));
    }
    Ok(())
}

/// Bits needed for `expected_elements` keys at false positive rate `p`
///
/// `m = ceil(-n ln(p) / (ln 2)^2)`, at least 1.
pub fn optimal_num_bits(expected_elements: usize, p: f64) -> Result<usize> {
    check_fpr(p)?;
    let n = expected_elements as f64;
    let bits = (-n * p.ln() / (LN_2 * LN_2)).ceil();
    Ok((bits as usize).max(1))
}

/// Hash count minimising the false positive rate: `round((m/n) ln 2)`, at least 1
pub fn optimal_num_hashes(num_bits: usize, expected_elements: usize) -> usize {
    if expected_elements == 0 {
        return 1;
    }
    let ratio = num_bits as f64 / expected_elements as f64;
    ((ratio * LN_2).round() as usize).max(1)
}

/// Expected false positive rate: `(1 - e^(-kn/m))^k`
pub fn false_positive_rate(num_bits: usize, num_hashes: usize, inserted: usize) -> f64 {
    if num_bits == 0 {
        return 1.0;
    }
    let k = num_hashes as f64;
    let exponent = -k * inserted as f64 / num_bits as f64;
    (1.0 - exponent.exp()).powi(num_hashes as i32)
}

/// False positive rate at the optimal hash count: `0.6185^(m/n)`
pub fn optimal_false_positive_rate(num_bits: usize, inserted: usize) -> f64 {
    if inserted == 0 {
        return 0.0;
    }
    OPTIMAL_FPR_BASE.powf(num_bits as f64 / inserted as f64)
}

/// Space a classic filter spends per key at rate `p`: `1.44 * log2(1/p)` bits
pub fn bits_per_key(p: f64) -> Result<f64> {
    check_fpr(p)?;
    Ok(1.44 * (1.0 / p).log2())
}

/// Calculate optimal Bloom filter parameters for given constraints
pub fn optimal_bloom_parameters(
    expected_elements: usize,
    desired_fpr: f64,
    max_memory_bits: Option<usize>,
) -> Result<BloomParameters> {
    check_fpr(desired_fpr)?;

    if expected_elements == 0 {
        return Ok(BloomParameters {
            optimal_num_bits: 1,
            optimal_num_hashes: 1,
            expected_fpr: 0.0,
        });
    }

    let optimal_bits = optimal_num_bits(expected_elements, desired_fpr)?;

    // Apply memory constraint if given
    let final_bits = match max_memory_bits {
        Some(max_bits) if optimal_bits > max_bits => max_bits.max(1),
        _ => optimal_bits,
    };

    let final_hashes = optimal_num_hashes(final_bits, expected_elements);
    let actual_fpr = false_positive_rate(final_bits, final_hashes, expected_elements);

    Ok(BloomParameters {
        optimal_num_bits: final_bits,
        optimal_num_hashes: final_hashes,
        expected_fpr: actual_fpr,
    })
}
