//! Injected uniform-choice provider for tie-breaks and collapses

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform random choices
///
/// The solver never reaches for a process-wide generator; every random
/// decision goes through the value implementing this trait, so seeding
/// and scripted choices are ordinary constructor arguments.
pub trait RandomSource {
    /// Uniform index in `0..len`, or `None` when `len` is zero
    fn choose_index(&mut self, len: usize) -> Option<usize>;

    /// Uniform element of a slice, or `None` when it is empty
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.choose_index(items.len())
            .and_then(|index| items.get(index))
    }
}

impl<R: RandomSource> RandomSource for &mut R {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        (**self).choose_index(len)
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
    seed: u64,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the selector was last started from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }
}

impl RandomSource for RandomSelector {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}
