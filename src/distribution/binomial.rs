//! Binomial distribution

use rand::Rng;

use super::special::{binomial_coefficient, ln_gamma};
use super::{Continuous, Sampleable};
use crate::error::Result;
use crate::error::util::{ensure_in_range, invalid};

/// Above this many trials the pmf is evaluated in log space
const LOG_SPACE_TRIALS: u64 = 1_000;

/// Number of successes in `trials` independent Bernoulli(`probability`) draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    trials: u64,
    probability: f64,
}

impl Binomial {
    /// Create a binomial distribution; needs `trials >= 1` and `0 <= p <= 1`
    pub fn new(trials: u64, probability: f64) -> Result<Self> {
        if trials == 0 {
            return invalid("trials must be a positive integer");
        }
        Ok(Self {
            trials,
            probability: ensure_in_range("probability", probability, 0.0, 1.0)?,
        })
    }

    /// Number of trials
    #[must_use]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Success probability per trial
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Probability mass at `k` successes
    #[must_use]
    pub fn pmf(&self, k: u64) -> f64 {
        if k > self.trials {
            return 0.0;
        }
        let (n, p) = (self.trials, self.probability);
        if p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if p == 1.0 {
            return if k == n { 1.0 } else { 0.0 };
        }
        if n <= LOG_SPACE_TRIALS {
            let coefficient = binomial_coefficient(n, k);
            if coefficient.is_finite() {
                return coefficient * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32);
            }
        }
        (ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
            + k as f64 * p.ln()
            + (n - k) as f64 * (1.0 - p).ln())
        .exp()
    }
}

impl Sampleable for Binomial {
    type Value = f64;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (0..self.trials)
            .filter(|_| rng.random::<f64>() < self.probability)
            .count() as f64
    }

    fn mean(&self) -> f64 {
        self.trials as f64 * self.probability
    }

    fn variance(&self) -> Option<f64> {
        Some(self.trials as f64 * self.probability * (1.0 - self.probability))
    }

    fn describe(&self) -> String {
        format!("Binomial(trials={}, probability={})", self.trials, self.probability)
    }
}

impl Continuous for Binomial {
    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let k = x.floor() as u64;
        if k >= self.trials {
            return 1.0;
        }
        (0..=k).map(|i| self.pmf(i)).sum::<f64>().min(1.0)
    }

    fn quantile(&self, p: f64) -> f64 {
        let mut cumulative = 0.0;
        for k in 0..=self.trials {
            cumulative += self.pmf(k);
            if cumulative >= p {
                return k as f64;
            }
        }
        self.trials as f64
    }
}
