//! Random number generator construction
//!
//! Every sampler in the crate takes an injected `rand::Rng`; these helpers
//! build the seeded or entropy-backed `StdRng` streams used for records and
//! for rayon tasks.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Create an RNG from an optional seed, falling back to OS entropy
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed_value) => StdRng::seed_from_u64(seed_value),
        None => StdRng::from_os_rng(),
    }
}

/// Create the RNG for one task of a batch
///
/// Each task gets a unique seed derived from the base seed, so the output
/// of a seeded batch does not depend on how rayon schedules the tasks.
#[must_use]
pub fn task_rng(base_seed: Option<u64>, task_index: usize) -> StdRng {
    match base_seed {
        Some(seed) => {
            let task_seed = seed.wrapping_add(task_index as u64);
            StdRng::seed_from_u64(task_seed)
        }
        None => StdRng::from_os_rng(),
    }
}
