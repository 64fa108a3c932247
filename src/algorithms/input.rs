// Seeded input generation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

/// `len` values drawn from `range`; the same seed always yields the same array
pub fn random_values(seed: u64, len: usize, range: RangeInclusive<i64>) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

/// Seed for a given rebuild attempt. Wraps, so any starting seed can be
/// retried indefinitely.
pub fn retry_seed(seed: u64, attempt: u64) -> u64 {
    seed.wrapping_add(attempt)
}

/// Sorted variant, for searches that require ordered input
pub fn random_sorted_values(seed: u64, len: usize, range: RangeInclusive<i64>) -> Vec<i64> {
    let mut values = random_values(seed, len, range);
    values.sort_unstable();
    values
}
