//! Seeded standard-normal sampling for the simulation engine.
//!
//! One [`NormalSource`] is created per Monte Carlo invocation and discarded
//! with it; there is no shared process-wide generator. A `Some(seed)` makes
//! the stream fully reproducible; `None` derives a fresh seed from OS entropy
//! through the same code path.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Standard-normal variate source scoped to a single pricing call.
#[derive(Debug)]
pub struct NormalSource {
    rng: StdRng,
    seed: u64,
}

impl NormalSource {
    /// Creates a source from an optional seed.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random::<u64>());
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed actually in effect (resolved from entropy when none was given).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws one standard-normal variate.
    #[inline]
    pub fn next_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Fills `out` with independent standard-normal variates.
    pub fn fill_normals(&mut self, out: &mut [f64]) {
        for z in out.iter_mut() {
            *z = self.next_normal();
        }
    }
}
