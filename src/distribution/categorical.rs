//! Categorical distribution over arbitrary outcomes

use rand::Rng;
use std::fmt::Debug;

use super::Sampleable;
use crate::error::Result;
use crate::error::util::ensure_probabilities;
use crate::value::AttributeValue;

/// Optional numeric interpretation of an outcome
pub trait AsNumeric {
    /// The outcome as a number, if it is one
    fn as_numeric(&self) -> Option<f64>;
}

impl AsNumeric for AttributeValue {
    fn as_numeric(&self) -> Option<f64> {
        if self.is_numeric() { self.as_f64() } else { None }
    }
}

impl AsNumeric for f64 {
    fn as_numeric(&self) -> Option<f64> {
        Some(*self)
    }
}

impl AsNumeric for i64 {
    fn as_numeric(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl AsNumeric for String {
    fn as_numeric(&self) -> Option<f64> {
        None
    }
}

impl AsNumeric for &str {
    fn as_numeric(&self) -> Option<f64> {
        None
    }
}

/// Weighted choice between outcomes
///
/// Sampling uses one uniform draw and a binary search over the cumulative
/// probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorical<T> {
    outcomes: Vec<T>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl<T: Clone + Debug + PartialEq + AsNumeric> Categorical<T> {
    /// Create from `(outcome, probability)` pairs that sum to one
    pub fn new(outcomes: impl IntoIterator<Item = (T, f64)>) -> Result<Self> {
        let (outcomes, probabilities): (Vec<T>, Vec<f64>) = outcomes.into_iter().unzip();
        ensure_probabilities(&probabilities)?;
        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut running = 0.0;
        for p in &probabilities {
            running += p;
            cumulative.push(running);
        }
        Ok(Self {
            outcomes,
            probabilities,
            cumulative,
        })
    }

    /// Outcomes in declaration order
    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }

    /// Probabilities in declaration order
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Probability of a specific outcome (0 if unknown)
    pub fn probability_of(&self, outcome: &T) -> f64 {
        self.outcomes
            .iter()
            .position(|o| o == outcome)
            .map_or(0.0, |i| self.probabilities[i])
    }

    /// Cumulative probability up to and including `outcome`
    pub fn cumulative_probability(&self, outcome: &T) -> Option<f64> {
        self.outcomes
            .iter()
            .position(|o| o == outcome)
            .map(|i| self.cumulative[i].min(1.0))
    }

    /// Outcome at cumulative probability `p`
    pub fn outcome_at(&self, p: f64) -> &T {
        let idx = self.cumulative.partition_point(|&c| c < p);
        &self.outcomes[idx.min(self.outcomes.len() - 1)]
    }

    /// Probability-weighted mean when every outcome is a number
    ///
    /// This is the centre [`Sampleable::variance`] is taken around, unlike
    /// [`Sampleable::mean`], which returns the mode.
    pub fn expected_value(&self) -> Option<f64> {
        let values: Option<Vec<f64>> = self.outcomes.iter().map(AsNumeric::as_numeric).collect();
        Some(values?.iter().zip(&self.probabilities).map(|(v, p)| v * p).sum())
    }

    /// Consume into `(outcome, probability)` pairs
    pub fn into_outcomes(self) -> Vec<(T, f64)> {
        self.outcomes.into_iter().zip(self.probabilities).collect()
    }
}

impl<T: Clone + Debug + PartialEq + AsNumeric> Sampleable for Categorical<T> {
    type Value = T;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let u = rng.random::<f64>();
        let idx = self.cumulative.partition_point(|&c| c <= u);
        self.outcomes[idx.min(self.outcomes.len() - 1)].clone()
    }

    /// The mode: highest-probability outcome, first on ties
    fn mean(&self) -> T {
        let mut best = 0;
        for (i, &p) in self.probabilities.iter().enumerate() {
            if p > self.probabilities[best] {
                best = i;
            }
        }
        self.outcomes[best].clone()
    }

    /// Numeric variance around [`Categorical::expected_value`]
    fn variance(&self) -> Option<f64> {
        let mean = self.expected_value()?;
        Some(
            self.outcomes
                .iter()
                .zip(&self.probabilities)
                .filter_map(|(o, p)| o.as_numeric().map(|v| p * (v - mean).powi(2)))
                .sum(),
        )
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self
            .outcomes
            .iter()
            .zip(&self.probabilities)
            .map(|(o, p)| format!("{o:?}: {p}"))
            .collect();
        format!("Categorical({})", parts.join(", "))
    }
}
