//! Normal (Gaussian) distribution

use rand::Rng;

use super::special::{normal_cdf, normal_quantile, standard_normal};
use super::{Continuous, Sampleable};
use crate::error::Result;
use crate::error::util::{ensure_finite, ensure_positive};

/// Normal distribution with mean `mu` and standard deviation `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Create a normal distribution; `sigma` must be positive
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        Ok(Self {
            mu: ensure_finite("mu", mu)?,
            sigma: ensure_positive("sigma", sigma)?,
        })
    }

    /// Location parameter
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale parameter
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Sampleable for Normal {
    type Value = f64;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.mu + self.sigma * standard_normal(rng)
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn variance(&self) -> Option<f64> {
        Some(self.sigma * self.sigma)
    }

    fn describe(&self) -> String {
        format!("Normal(mean={}, std_dev={})", self.mu, self.sigma)
    }
}

impl Continuous for Normal {
    fn cdf(&self, x: f64) -> f64 {
        normal_cdf((x - self.mu) / self.sigma)
    }

    fn quantile(&self, p: f64) -> f64 {
        self.mu + self.sigma * normal_quantile(p)
    }
}
