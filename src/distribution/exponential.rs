//! Exponential distribution

use rand::Rng;

use super::special::open_unit;
use super::{Continuous, Sampleable};
use crate::error::Result;
use crate::error::util::ensure_positive;

/// Exponential distribution with rate `lambda`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// Create an exponential distribution; `rate` must be positive
    pub fn new(rate: f64) -> Result<Self> {
        Ok(Self {
            rate: ensure_positive("rate", rate)?,
        })
    }

    /// Rate parameter
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Sampleable for Exponential {
    type Value = f64;

    // Inverse transform: -ln(1 - U) / rate, with 1 - U in (0, 1]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        -open_unit(rng).ln() / self.rate
    }

    fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    fn variance(&self) -> Option<f64> {
        Some(1.0 / (self.rate * self.rate))
    }

    fn describe(&self) -> String {
        format!("Exponential(rate={})", self.rate)
    }
}

impl Continuous for Exponential {
    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            1.0 - (-self.rate * x).exp()
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return f64::INFINITY;
        }
        -(1.0 - p).ln() / self.rate
    }
}
