//! # Random State
//!
//! The random source used by forecasts after startup. Seeded once from
//! `--seed` (reproducible runs) or from entropy.

use std::sync::{Arc, Mutex};

use tripus_core::RandomSource;

#[derive(Clone)]
pub struct RandomState {
    rng: Arc<Mutex<Box<dyn RandomSource + Send>>>,
}

impl RandomState {
    pub fn new(rng: Box<dyn RandomSource + Send>) -> Self {
        RandomState {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Executes a function with exclusive access to the source.
    pub fn with_rng<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut dyn RandomSource) -> R,
    {
        let mut rng = self.rng.lock().expect("Random mutex poisoned");
        f(rng.as_mut())
    }
}

impl std::fmt::Debug for RandomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomState").finish_non_exhaustive()
    }
}
