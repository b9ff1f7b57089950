//! Basic usage examples for kbloom

use fnv::FnvHasher;
use kbloom::utils::{bits_per_key, optimal_bloom_parameters};
use kbloom::{BloomFilter, HashFunction};
use std::hash::Hasher;

/// FNV-1a keyed by `seed`, finished with splitmix64
fn seeded_fnv(seed: u64) -> Box<dyn HashFunction> {
    Box::new(move |key: &[u8]| {
        let mut hasher = FnvHasher::with_key(0xcbf29ce484222325 ^ seed);
        hasher.write(key);
        let mut h = hasher.finish();
        h = (h ^ (h >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        h = (h ^ (h >> 27)).wrapping_mul(0x94d049bb133111eb);
        h ^ (h >> 31)
    })
}

/// The classic string hash, as a plain function pointer
fn djb2(key: &[u8]) -> u64 {
    key.iter()
        .fold(5381u64, |h, &b| h.wrapping_mul(33).wrapping_add(b as u64))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== kbloom examples ===\n");

    // Example 1: Hand-picked size and hash functions
    println!("1. Basic Bloom Filter:");
    let hashes: Vec<Box<dyn HashFunction>> = vec![
        Box::new(djb2 as fn(&[u8]) -> u64),
        seeded_fnv(1),
        seeded_fnv(2),
    ];
    let mut bloom = BloomFilter::new(1024, 3, hashes)?;

    let fruit = ["apple", "cherry", "grape", "lemon", "mango"];
    for item in &fruit {
        bloom.add(item);
    }

    for item in fruit.iter().chain(&["banana", "kiwi", "plum"]) {
        println!("  {} in filter: {}", item, bloom.check(item));
    }

    println!("  {}", bloom.stats());
    println!();

    // Example 2: Sizing from a target false positive rate
    println!("2. Sized for 10,000 keys at 1%:");
    let params = optimal_bloom_parameters(10_000, 0.01, None)?;
    println!(
        "  m = {} bits, k = {}, expected FPR = {:.4}, {:.2} bits/key",
        params.optimal_num_bits,
        params.optimal_num_hashes,
        params.expected_fpr,
        bits_per_key(0.01)?
    );

    let hashes = (0..params.optimal_num_hashes as u64).map(seeded_fnv).collect();
    let mut sized = BloomFilter::from_hash_functions(params.optimal_num_bits, hashes)?;

    let start = std::time::Instant::now();
    for i in 0..10_000u32 {
        sized.add(&i.to_le_bytes());
    }
    let insert_time = start.elapsed();

    let start = std::time::Instant::now();
    let false_positives = (10_000..110_000u32)
        .filter(|i| sized.check(&i.to_le_bytes()))
        .count();
    let query_time = start.elapsed();

    println!("    Insert: {:?}", insert_time);
    println!("    Query:  {:?}", query_time);
    println!(
        "    False positives: {}/100000 ({:.4})",
        false_positives,
        false_positives as f64 / 100_000.0
    );
    println!("    Estimated elements: {:.0}", sized.estimated_len());
    println!();

    // Example 3: Merging filters built with the same hash functions
    println!("3. Union:");
    let mut left = BloomFilter::from_hash_functions(512, vec![seeded_fnv(7), seeded_fnv(8)])?;
    let mut right = BloomFilter::from_hash_functions(512, vec![seeded_fnv(7), seeded_fnv(8)])?;
    left.add("north");
    right.add("south");
    left.union_with(&right)?;
    println!(
        "  north: {}, south: {}, east: {}",
        left.check("north"),
        left.check("south"),
        left.check("east")
    );

    Ok(())
}
