use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform picks for the surprise spotlight.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Process-wide thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_is_reproducible() {
        let mut first = SeededRandom::new(42);
        let mut second = SeededRandom::new(42);
        let a: Vec<_> = (0..16).map(|_| first.pick_index(10)).collect();
        let b: Vec<_> = (0..16).map(|_| second.pick_index(10)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn thread_random_stays_in_range() {
        let mut random = ThreadRandom;
        for _ in 0..64 {
            assert!(random.pick_index(3) < 3);
        }
        assert_eq!(random.pick_index(1), 0);
    }
}
