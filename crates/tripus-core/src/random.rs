//! # Random Sources
//!
//! Every random draw in tripus-core goes through [`RandomSource`], so callers
//! decide whether numbers come from an entropy-seeded generator (the app), a
//! fixed seed (reproducible demo data) or a constant (tests).
//!
//! ```text
//! forecast_revenue ──┐
//! product_series ────┼──► &mut dyn RandomSource ──┬── SeededRandom (StdRng)
//! generate_* ────────┘                            └── FixedRandom (constant)
//! ```
//!
//! With `FixedRandom::midpoint()` every `uniform(a, b)` returns the midpoint,
//! which makes the forecast noise a no-op (`uniform(0.85, 1.15) == 1.0`,
//! `uniform(-0.1, 0.1) == 0.0`).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Trait
// =============================================================================

/// Source of uniformly distributed numbers.
pub trait RandomSource {
    /// Returns a value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns a value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Returns an index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let scaled = (self.next_unit() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// Returns an integer in `low..=high`.
    fn int_inclusive(&mut self, low: i64, high: i64) -> i64 {
        let span = (high - low + 1).max(1) as usize;
        low + self.index(span) as i64
    }

    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

// =============================================================================
// Implementations
// =============================================================================

/// `StdRng`-backed source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Reproducible source (same seed, same sequence).
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same unit value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl FixedRandom {
    /// `uniform(a, b)` yields `(a + b) / 2`.
    pub const fn midpoint() -> Self {
        FixedRandom(0.5)
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        // Keep the half-open contract even if constructed with 1.0.
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
