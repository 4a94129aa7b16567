use crate::*;
use alloc::vec::Vec;
use rand::Rng;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, pair_count: PairCount, pool: &[Symbol]) -> Result<Vec<Card>>;
}

/// Unbiased in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
