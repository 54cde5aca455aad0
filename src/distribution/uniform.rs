//! Continuous uniform distribution

use rand::Rng;

use super::{Continuous, Sampleable};
use crate::error::Result;
use crate::error::util::{ensure_finite, invalid};

/// Uniform distribution on `[min, max]`
///
/// `min == max` is allowed and always yields that constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    min: f64,
    max: f64,
}

impl Uniform {
    /// Create a uniform distribution; requires `min <= max`
    pub fn new(min: f64, max: f64) -> Result<Self> {
        ensure_finite("min", min)?;
        ensure_finite("max", max)?;
        if min > max {
            return invalid(format!("min ({min}) must not exceed max ({max})"));
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Sampleable for Uniform {
    type Value = f64;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.width() == 0.0 {
            return self.min;
        }
        self.min + self.width() * rng.random::<f64>()
    }

    fn mean(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    fn variance(&self) -> Option<f64> {
        Some(self.width() * self.width() / 12.0)
    }

    fn describe(&self) -> String {
        format!("Uniform(min={}, max={})", self.min, self.max)
    }
}

impl Continuous for Uniform {
    fn cdf(&self, x: f64) -> f64 {
        if x < self.min {
            0.0
        } else if x >= self.max {
            1.0
        } else {
            (x - self.min) / self.width()
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        self.min + self.width() * p.clamp(0.0, 1.0)
    }
}
