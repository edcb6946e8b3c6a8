//! Random-number plumbing. The core's only contract with a random source is:
//! uniform int in `[0,bound)`, uniform double in `[0,1)`, and a random
//! permutation of `[0,n)`. Heuristics and optimizers are generic over
//! [`RandomSource`], so tests can swap in a seeded instance for
//! reproducibility.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A seedable, per-instance source of uniform randomness.
///
/// Implementations must not share mutable state across instances.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be > 0.
    fn uniform_usize(&mut self, bound: usize) -> usize;
    /// Uniform double in `[0, 1)`.
    fn uniform_f64(&mut self) -> f64;
    /// Uniform boolean (fair coin).
    fn uniform_bool(&mut self) -> bool {
        self.uniform_usize(2) == 0
    }
    /// A random permutation of `[0, n)`.
    fn permutation(&mut self, n: usize) -> Vec<usize>;
    /// In-place Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Default [`RandomSource`] backed by `rand`'s `StdRng`, one per thread or
/// per optimizer instance.
pub struct ThreadRandomSource {
    rng: StdRng,
}

impl ThreadRandomSource {
    /// A fresh, entropy-seeded source.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// A deterministically-seeded source, for reproducible tests/runs.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for ThreadRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandomSource {
    fn uniform_usize(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn uniform_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut v: Vec<usize> = (0..n).collect();
        v.shuffle(&mut self.rng);
        v
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
