//! Shared helpers for logging, progress reporting and RNG construction

pub mod logging;
pub mod rng;

pub use rng::{rng_from_seed, task_rng};
