//! Deterministic per-endpoint and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each ONU gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (onu_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive IDs uniformly across the seed space.  Arrival
//! streams therefore never share state, and adding an endpoint at the end of
//! the list does not disturb the streams of existing endpoints.
//!
//! The planner draws from a separate [`SimRng`] so the number of arrivals in
//! a round has no effect on the optimizer's random choices.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::OnuId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Inverse-transform draw from an exponential distribution with `mean`.
///
/// `u` is uniform in `[0, 1)`, so `1 - u` is in `(0, 1]` and the logarithm is
/// always finite.
#[inline]
fn exponential_from_uniform(mean: f64, u: f64) -> f64 {
    -mean * (1.0 - u).ln()
}

// ── OnuRng ────────────────────────────────────────────────────────────────────

/// Per-endpoint deterministic RNG driving one ONU's arrival process.
pub struct OnuRng(SmallRng);

impl OnuRng {
    /// Seed deterministically from the run's global seed and an ONU ID.
    pub fn new(global_seed: u64, onu: OnuId) -> Self {
        let seed = global_seed ^ (onu.0 as u64).wrapping_mul(MIXING_CONSTANT);
        OnuRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample an exponentially distributed value with the given mean.
    #[inline]
    pub fn exponential(&mut self, mean: f64) -> f64 {
        exponential_from_uniform(mean, self.0.r#gen::<f64>())
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (endpoint shuffles and path
/// draws in the planner).
///
/// Single-threaded only.  Parallel replications each build their own.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
