//! Random spacing for synthetic timestamps.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Increment range, in milliseconds, between synthetic timestamps.
pub const JITTER_RANGE_MS: Range<i64> = 100..1100;

/// Produces the gap between two consecutive synthetic timestamps.
pub trait JitterSource {
    /// Next increment in milliseconds. Implementations should stay within
    /// [`JITTER_RANGE_MS`].
    fn next_increment(&mut self) -> i64;
}

/// Jitter drawn uniformly from [`JITTER_RANGE_MS`] using any RNG.
#[derive(Debug, Clone)]
pub struct RandomJitter<R> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    /// Seeded jitter, reproducible across runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Jitter seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn next_increment(&mut self) -> i64 {
        self.rng.gen_range(JITTER_RANGE_MS)
    }
}

/// Constant increment, for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedJitter(pub i64);

impl JitterSource for FixedJitter {
    fn next_increment(&mut self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_jitter_stays_in_range() {
        let mut jitter = RandomJitter::seeded(42);
        for _ in 0..1000 {
            let step = jitter.next_increment();
            assert!(JITTER_RANGE_MS.contains(&step), "step {} out of range", step);
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = RandomJitter::seeded(7);
        let mut b = RandomJitter::seeded(7);
        let xs: Vec<i64> = (0..16).map(|_| a.next_increment()).collect();
        let ys: Vec<i64> = (0..16).map(|_| b.next_increment()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_fixed_jitter() {
        let mut jitter = FixedJitter(250);
        assert_eq!(jitter.next_increment(), 250);
        assert_eq!(jitter.next_increment(), 250);
    }
}
