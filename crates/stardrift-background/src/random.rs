//! Random source for star placement and shooting star spawns.

use rand::{Rng, SeedableRng, rngs::StdRng, rngs::ThreadRng};

/// Supplies uniform random numbers in `0.0..1.0`.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform value in `min..min + span`.
    fn range(&mut self, min: f32, span: f32) -> f32 {
        min + self.next_f32() * span
    }
}

/// Thread-local OS-seeded randomness.
#[derive(Debug, Default)]
pub struct ThreadRandom(ThreadRng);

impl ThreadRandom {
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl RandomSource for ThreadRandom {
    fn next_f32(&mut self) -> f32 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.0.gen_range(0.0..1.0)
    }
}
