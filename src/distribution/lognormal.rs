//! Log-normal distribution

use rand::Rng;

use super::special::{normal_cdf, normal_quantile, standard_normal};
use super::{Continuous, Sampleable};
use crate::error::Result;
use crate::error::util::{ensure_finite, ensure_positive};

/// Distribution of `exp(X)` where `X ~ Normal(mu, sigma)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    mu: f64,
    sigma: f64,
}

impl LogNormal {
    /// Create a log-normal distribution; `sigma` must be positive
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        Ok(Self {
            mu: ensure_finite("mu", mu)?,
            sigma: ensure_positive("sigma", sigma)?,
        })
    }

    /// Mean of the underlying normal
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard deviation of the underlying normal
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Sampleable for LogNormal {
    type Value = f64;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (self.mu + self.sigma * standard_normal(rng)).exp()
    }

    fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }

    fn variance(&self) -> Option<f64> {
        let s2 = self.sigma * self.sigma;
        Some((s2.exp() - 1.0) * (2.0 * self.mu + s2).exp())
    }

    fn describe(&self) -> String {
        format!("LogNormal(mu={}, sigma={})", self.mu, self.sigma)
    }
}

impl Continuous for LogNormal {
    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            normal_cdf((x.ln() - self.mu) / self.sigma)
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        (self.mu + self.sigma * normal_quantile(p)).exp()
    }
}
