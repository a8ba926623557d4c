//! Seeded simulation RNG.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Single RNG stream for spawn positions and shake re-rolls.
///
/// Seeded from `Tunables::seed`, so headless runs replay identically.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(Pcg32);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Uniform sample over `[-1, 1]`.
    #[inline]
    pub fn unit_signed(&mut self) -> f32 {
        self.0.random_range(-1.0..=1.0)
    }

    /// Uniform sample over `[lo, hi)`; collapses to `lo` for an empty range.
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.random_range(lo..hi)
    }
}
