//! Univariate distribution primitives
//!
//! Every primitive is an immutable parameter value; randomness always comes
//! from an injected [`rand::Rng`]. [`SeededDistribution`] bundles a
//! distribution with its own reproducible stream for callers that want the
//! distribution to own its RNG.

pub mod beta;
pub mod binomial;
pub mod categorical;
pub mod exponential;
pub mod lognormal;
pub mod normal;
pub mod special;
pub mod uniform;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SynthError};
use crate::value::AttributeValue;

pub use beta::Beta;
pub use binomial::Binomial;
pub use categorical::{AsNumeric, Categorical};
pub use exponential::Exponential;
pub use lognormal::LogNormal;
pub use normal::Normal;
pub use uniform::Uniform;

/// Capability shared by all distribution primitives
pub trait Sampleable {
    /// Type of a single draw
    type Value;

    /// Draw one value
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Value;

    /// Analytic mean (the mode for categorical outcomes)
    fn mean(&self) -> Self::Value;

    /// Analytic variance, when defined
    fn variance(&self) -> Option<f64>;

    /// Human readable description including parameters
    fn describe(&self) -> String;
}

/// Numeric distributions with a closed-form or numerically inverted CDF
pub trait Continuous: Sampleable {
    /// Cumulative probability `P(X <= x)`
    fn cdf(&self, x: f64) -> f64;

    /// Smallest `x` with `cdf(x) >= p`
    fn quantile(&self, p: f64) -> f64;
}

/// Any supported distribution, producing [`AttributeValue`]s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionSpec", into = "DistributionSpec")]
pub enum Distribution {
    /// Gaussian
    Normal(Normal),
    /// Continuous uniform
    Uniform(Uniform),
    /// Exponential
    Exponential(Exponential),
    /// Beta on `[0, 1]`
    Beta(Beta),
    /// Binomial count
    Binomial(Binomial),
    /// Weighted choice between labelled outcomes
    Categorical(Categorical<AttributeValue>),
    /// Log-normal
    LogNormal(LogNormal),
}

impl Distribution {
    /// Family name, e.g. `"normal"`
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal(_) => "normal",
            Self::Uniform(_) => "uniform",
            Self::Exponential(_) => "exponential",
            Self::Beta(_) => "beta",
            Self::Binomial(_) => "binomial",
            Self::Categorical(_) => "categorical",
            Self::LogNormal(_) => "lognormal",
        }
    }

    /// Numeric analytic mean, if the mean is a number
    ///
    /// Categoricals report their probability-weighted mean here, not the
    /// mode, and only when every outcome is numeric.
    #[must_use]
    pub fn numeric_mean(&self) -> Option<f64> {
        match self {
            Self::Normal(d) => Some(d.mean()),
            Self::Uniform(d) => Some(d.mean()),
            Self::Exponential(d) => Some(d.mean()),
            Self::Beta(d) => Some(d.mean()),
            Self::Binomial(d) => Some(d.mean()),
            Self::Categorical(d) => d.expected_value(),
            Self::LogNormal(d) => Some(d.mean()),
        }
    }

    /// Cumulative probability of a value
    ///
    /// For categorical outcomes this is the probability of all outcomes up to
    /// and including the given one, in declaration order.
    #[must_use]
    pub fn cdf(&self, value: &AttributeValue) -> Option<f64> {
        match self {
            Self::Categorical(d) => d.cumulative_probability(value),
            other => value.as_f64().and_then(|x| other.numeric_cdf(x)),
        }
    }

    /// CDF of numeric families at `x`; `None` for categorical
    #[must_use]
    pub fn numeric_cdf(&self, x: f64) -> Option<f64> {
        match self {
            Self::Normal(d) => Some(d.cdf(x)),
            Self::Uniform(d) => Some(d.cdf(x)),
            Self::Exponential(d) => Some(d.cdf(x)),
            Self::Beta(d) => Some(d.cdf(x)),
            Self::Binomial(d) => Some(d.cdf(x)),
            Self::LogNormal(d) => Some(d.cdf(x)),
            Self::Categorical(_) => None,
        }
    }

    /// Value at cumulative probability `p`
    #[must_use]
    pub fn quantile(&self, p: f64) -> AttributeValue {
        match self {
            Self::Normal(d) => AttributeValue::Number(d.quantile(p)),
            Self::Uniform(d) => AttributeValue::Number(d.quantile(p)),
            Self::Exponential(d) => AttributeValue::Number(d.quantile(p)),
            Self::Beta(d) => AttributeValue::Number(d.quantile(p)),
            Self::Binomial(d) => AttributeValue::Integer(d.quantile(p) as i64),
            Self::Categorical(d) => d.outcome_at(p).clone(),
            Self::LogNormal(d) => AttributeValue::Number(d.quantile(p)),
        }
    }
}

impl Sampleable for Distribution {
    type Value = AttributeValue;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> AttributeValue {
        match self {
            Self::Normal(d) => AttributeValue::Number(d.sample(rng)),
            Self::Uniform(d) => AttributeValue::Number(d.sample(rng)),
            Self::Exponential(d) => AttributeValue::Number(d.sample(rng)),
            Self::Beta(d) => AttributeValue::Number(d.sample(rng)),
            Self::Binomial(d) => AttributeValue::Integer(d.sample(rng) as i64),
            Self::Categorical(d) => d.sample(rng),
            Self::LogNormal(d) => AttributeValue::Number(d.sample(rng)),
        }
    }

    fn mean(&self) -> AttributeValue {
        match self {
            Self::Categorical(d) => d.mean(),
            Self::Binomial(d) => AttributeValue::Number(d.mean()),
            other => AttributeValue::Number(other.numeric_mean().unwrap_or(f64::NAN)),
        }
    }

    fn variance(&self) -> Option<f64> {
        match self {
            Self::Normal(d) => d.variance(),
            Self::Uniform(d) => d.variance(),
            Self::Exponential(d) => d.variance(),
            Self::Beta(d) => d.variance(),
            Self::Binomial(d) => d.variance(),
            Self::Categorical(d) => d.variance(),
            Self::LogNormal(d) => d.variance(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Normal(d) => d.describe(),
            Self::Uniform(d) => d.describe(),
            Self::Exponential(d) => d.describe(),
            Self::Beta(d) => d.describe(),
            Self::Binomial(d) => d.describe(),
            Self::Categorical(d) => d.describe(),
            Self::LogNormal(d) => d.describe(),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

macro_rules! impl_from_primitive {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Distribution {
                fn from(d: $variant) -> Self {
                    Self::$variant(d)
                }
            }
        )*
    };
}

impl_from_primitive!(Normal, Uniform, Exponential, Beta, Binomial, LogNormal);

impl From<Categorical<AttributeValue>> for Distribution {
    fn from(d: Categorical<AttributeValue>) -> Self {
        Self::Categorical(d)
    }
}

/// Serialized form of [`Distribution`]; validated on conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DistributionSpec {
    /// `{"type": "normal", "mean": .., "std_dev": ..}`
    Normal { mean: f64, std_dev: f64 },
    /// `{"type": "uniform", "min": .., "max": ..}`
    Uniform { min: f64, max: f64 },
    /// `{"type": "exponential", "rate": ..}`
    Exponential { rate: f64 },
    /// `{"type": "beta", "alpha": .., "beta": ..}`
    Beta { alpha: f64, beta: f64 },
    /// `{"type": "binomial", "trials": .., "probability": ..}`
    Binomial { trials: u64, probability: f64 },
    /// `{"type": "categorical", "outcomes": [[value, probability], ..]}`
    Categorical { outcomes: Vec<(AttributeValue, f64)> },
    /// `{"type": "lognormal", "mu": .., "sigma": ..}`
    LogNormal { mu: f64, sigma: f64 },
}

impl TryFrom<DistributionSpec> for Distribution {
    type Error = SynthError;

    fn try_from(spec: DistributionSpec) -> Result<Self> {
        Ok(match spec {
            DistributionSpec::Normal { mean, std_dev } => Normal::new(mean, std_dev)?.into(),
            DistributionSpec::Uniform { min, max } => Uniform::new(min, max)?.into(),
            DistributionSpec::Exponential { rate } => Exponential::new(rate)?.into(),
            DistributionSpec::Beta { alpha, beta } => Beta::new(alpha, beta)?.into(),
            DistributionSpec::Binomial {
                trials,
                probability,
            } => Binomial::new(trials, probability)?.into(),
            DistributionSpec::Categorical { outcomes } => Categorical::new(outcomes)?.into(),
            DistributionSpec::LogNormal { mu, sigma } => LogNormal::new(mu, sigma)?.into(),
        })
    }
}

impl From<Distribution> for DistributionSpec {
    fn from(d: Distribution) -> Self {
        match d {
            Distribution::Normal(n) => Self::Normal {
                mean: n.mu(),
                std_dev: n.sigma(),
            },
            Distribution::Uniform(u) => Self::Uniform {
                min: u.min(),
                max: u.max(),
            },
            Distribution::Exponential(e) => Self::Exponential { rate: e.rate() },
            Distribution::Beta(b) => Self::Beta {
                alpha: b.alpha(),
                beta: b.beta(),
            },
            Distribution::Binomial(b) => Self::Binomial {
                trials: b.trials(),
                probability: b.probability(),
            },
            Distribution::Categorical(c) => Self::Categorical {
                outcomes: c.into_outcomes(),
            },
            Distribution::LogNormal(l) => Self::LogNormal {
                mu: l.mu(),
                sigma: l.sigma(),
            },
        }
    }
}

/// A distribution that owns its own seeded random stream
///
/// Two instances built from equal distributions and the same seed produce
/// identical sample sequences.
#[derive(Debug, Clone)]
pub struct SeededDistribution<D> {
    distribution: D,
    rng: StdRng,
}

impl<D: Sampleable> SeededDistribution<D> {
    /// Bundle a distribution with a stream seeded from `seed`
    pub fn new(distribution: D, seed: u64) -> Self {
        Self {
            distribution,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw the next value from the owned stream
    pub fn sample(&mut self) -> D::Value {
        self.distribution.sample(&mut self.rng)
    }

    /// Draw `n` values from the owned stream
    pub fn sample_n(&mut self, n: usize) -> Vec<D::Value> {
        (0..n).map(|_| self.sample()).collect()
    }

    /// The wrapped distribution
    pub fn distribution(&self) -> &D {
        &self.distribution
    }
}
