use fnv::FnvHasher;
use kbloom::HashFunction;
use std::hash::Hasher;

/// FNV-1a over the key, keyed by `seed`, then a splitmix64 finaliser so the
/// low bits survive `mod m`
pub fn fnv_seeded(seed: u64) -> Box<dyn HashFunction> {
    Box::new(move |key: &[u8]| {
        let mut hasher = FnvHasher::with_key(0xcbf29ce484222325 ^ seed);
        hasher.write(key);
        let mut h = hasher.finish() ^ seed.wrapping_mul(0x9e3779b97f4a7c15);
        h = (h ^ (h >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        h = (h ^ (h >> 27)).wrapping_mul(0x94d049bb133111eb);
        h ^ (h >> 31)
    })
}

/// `k` independent-looking hash functions with seeds `1..=k`
pub fn fnv_family(k: usize) -> Vec<Box<dyn HashFunction>> {
    (1..=k as u64).map(fnv_seeded).collect()
}
