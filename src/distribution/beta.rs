//! Beta distribution on the unit interval

use rand::Rng;

use super::special::{bisect_quantile, gamma_sample, regularized_incomplete_beta};
use super::{Continuous, Sampleable};
use crate::error::Result;
use crate::error::util::ensure_positive;

/// Beta distribution with shape parameters `alpha` and `beta`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beta {
    alpha: f64,
    beta: f64,
}

impl Beta {
    /// Create a beta distribution; both shapes must be positive
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            alpha: ensure_positive("alpha", alpha)?,
            beta: ensure_positive("beta", beta)?,
        })
    }

    /// First shape parameter
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Second shape parameter
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl Sampleable for Beta {
    type Value = f64;

    // X / (X + Y) with X ~ Gamma(alpha), Y ~ Gamma(beta)
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let x = gamma_sample(rng, self.alpha);
        let y = gamma_sample(rng, self.beta);
        if x + y == 0.0 { 0.5 } else { x / (x + y) }
    }

    fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    fn variance(&self) -> Option<f64> {
        let total = self.alpha + self.beta;
        Some(self.alpha * self.beta / (total * total * (total + 1.0)))
    }

    fn describe(&self) -> String {
        format!("Beta(alpha={}, beta={})", self.alpha, self.beta)
    }
}

impl Continuous for Beta {
    fn cdf(&self, x: f64) -> f64 {
        regularized_incomplete_beta(x, self.alpha, self.beta)
    }

    fn quantile(&self, p: f64) -> f64 {
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return 1.0;
        }
        bisect_quantile(|x| self.cdf(x), p, 0.0, 1.0)
    }
}
