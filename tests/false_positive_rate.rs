use kbloom::utils::{false_positive_rate, optimal_bloom_parameters};
use kbloom::BloomFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

mod common;
use common::fnv_family;

fn random_keys(rng: &mut StdRng, count: usize, exclude: &HashSet<u64>) -> Vec<u64> {
    let mut keys = HashSet::with_capacity(count);
    while keys.len() < count {
        let key: u64 = rng.gen();
        if !exclude.contains(&key) {
            keys.insert(key);
        }
    }
    keys.into_iter().collect()
}

fn empirical_fpr(expected_elements: usize, desired_fpr: f64, probes: usize, seed: u64) -> f64 {
    let params = optimal_bloom_parameters(expected_elements, desired_fpr, None).unwrap();
    let mut bloom = BloomFilter::new(
        params.optimal_num_bits,
        params.optimal_num_hashes,
        fnv_family(params.optimal_num_hashes),
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(seed);
    let inserted = random_keys(&mut rng, expected_elements, &HashSet::new());
    for key in &inserted {
        bloom.add(&key.to_le_bytes());
    }
    for key in &inserted {
        assert!(bloom.check(&key.to_le_bytes()));
    }

    let inserted: HashSet<u64> = inserted.into_iter().collect();
    let absent = random_keys(&mut rng, probes, &inserted);
    let false_positives = absent
        .iter()
        .filter(|key| bloom.check(&key.to_le_bytes()))
        .count();

    false_positives as f64 / probes as f64
}

#[test]
fn test_fpr_one_percent() {
    let rate = empirical_fpr(1_000, 0.01, 20_000, 42);
    assert!(rate < 0.02, "empirical FPR {} grossly exceeds 0.01", rate);
}

#[test]
fn test_fpr_tenth_of_percent() {
    let rate = empirical_fpr(5_000, 0.001, 50_000, 7);
    assert!(rate < 0.003, "empirical FPR {} grossly exceeds 0.001", rate);
}

#[test]
fn test_overloaded_filter_tracks_formula() {
    // Sized for 100 keys, loaded with 1000
    let params = optimal_bloom_parameters(100, 0.01, None).unwrap();
    let (m, k) = (params.optimal_num_bits, params.optimal_num_hashes);
    let mut bloom = BloomFilter::new(m, k, fnv_family(k)).unwrap();

    for i in 0..1_000u32 {
        bloom.add(&format!("member-{}", i));
    }
    let probes = 10_000;
    let hits = (0..probes)
        .filter(|i| bloom.check(&format!("absent-{}", i)))
        .count();
    let rate = hits as f64 / probes as f64;

    let predicted = false_positive_rate(m, k, 1_000);
    assert!(rate > 0.5, "overloaded filter should mostly say yes, got {}", rate);
    assert!((rate - predicted).abs() < 0.1, "rate {} vs predicted {}", rate, predicted);
}

#[test]
fn test_estimated_fpr_matches_empirical() {
    let params = optimal_bloom_parameters(2_000, 0.05, None).unwrap();
    let k = params.optimal_num_hashes;
    let mut bloom = BloomFilter::new(params.optimal_num_bits, k, fnv_family(k)).unwrap();
    for i in 0..2_000u32 {
        bloom.add(&i.to_be_bytes());
    }

    let estimated = bloom.estimated_fpr();
    assert!((estimated - 0.05).abs() < 0.02, "estimated {}", estimated);
    assert!((bloom.estimated_len() - 2_000.0).abs() < 150.0);
}
