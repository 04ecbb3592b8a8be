//! Injectable random source shared by random-drawing fields

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cloneable handle to a lockable random generator.
///
/// Clones share the same underlying generator, so several fields can draw
/// from one seeded source and still produce a reproducible stream.
#[derive(Clone)]
pub struct RandomSource {
    rng: Arc<Mutex<StdRng>>,
}

impl RandomSource {
    /// Source seeded from the operating system
    pub fn from_os() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic source for reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Draw a uniform integer in `[min, max]`
    #[inline]
    pub fn between(&self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(min..=max)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_os()
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}
