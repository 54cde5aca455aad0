//! Marginal distributions with raw-scale transforms

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analysis::fitting::{DistributionFitting, FittedDistribution, distribution_parameters};
use crate::distribution::{Categorical, Distribution};
use crate::error::Result;
use crate::error::util::{ensure_finite, ensure_positive, invalid};
use crate::value::AttributeValue;

/// One variable's distribution, with an optional affine rescaling
///
/// `transform` maps a raw value to its cumulative probability and
/// `inverse_transform` maps a probability back to a raw value. For rescaled
/// marginals (e.g. a beta fitted on min–max normalized data) the raw value
/// is `offset + scale * x` for `x` on the distribution's own support.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginalDistribution {
    variable: String,
    distribution: Distribution,
    parameters: BTreeMap<String, f64>,
    offset: f64,
    scale: f64,
}

impl MarginalDistribution {
    /// Marginal on the distribution's own scale
    pub fn new(variable: impl Into<String>, distribution: Distribution) -> Self {
        let parameters = distribution_parameters(&distribution, 0.0, 1.0);
        Self {
            variable: variable.into(),
            distribution,
            parameters,
            offset: 0.0,
            scale: 1.0,
        }
    }

    /// Return a copy that maps the support onto `offset + scale * x`
    pub fn with_scaling(self, offset: f64, scale: f64) -> Result<Self> {
        let offset = ensure_finite("offset", offset)?;
        let scale = ensure_positive("scale", scale)?;
        let parameters = distribution_parameters(&self.distribution, offset, scale);
        Ok(Self {
            offset,
            scale,
            parameters,
            ..self
        })
    }

    /// Marginal from a fitted candidate
    pub fn from_fit(variable: impl Into<String>, fit: &FittedDistribution) -> Self {
        Self {
            variable: variable.into(),
            distribution: fit.distribution.clone(),
            parameters: fit.parameters.clone(),
            offset: fit.offset,
            scale: fit.scale,
        }
    }

    /// Marginal from the best fit of a fitting result
    pub fn from_fitting(fitting: &DistributionFitting) -> Self {
        Self::from_fit(fitting.variable.clone(), &fitting.best_fit)
    }

    /// Empirical categorical marginal from observed values
    ///
    /// Outcomes keep their first-appearance order unless `sort` is set, in
    /// which case they are ordered numerically where possible and by their
    /// text otherwise.
    pub fn empirical<'a>(
        variable: impl Into<String>,
        values: impl IntoIterator<Item = &'a AttributeValue>,
        sort: bool,
    ) -> Result<Self> {
        let variable = variable.into();
        let mut counts: Vec<(AttributeValue, usize)> = Vec::new();
        let mut total = 0usize;
        for value in values {
            total += 1;
            match counts.iter_mut().find(|(v, _)| v == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value.clone(), 1)),
            }
        }
        if total == 0 {
            return invalid(format!("no observed values for {variable}"));
        }
        if sort {
            counts.sort_by(|(a, _), (b, _)| match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.to_string().cmp(&b.to_string()),
            });
        }

        let outcomes = counts
            .into_iter()
            .map(|(value, count)| (value, count as f64 / total as f64));
        let distribution = Distribution::Categorical(Categorical::new(outcomes)?);
        Ok(Self::new(variable, distribution))
    }

    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    #[must_use]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    /// Raw value to cumulative probability in `[0, 1]`
    #[must_use]
    pub fn transform(&self, value: &AttributeValue) -> Option<f64> {
        match &self.distribution {
            Distribution::Categorical(_) => self.distribution.cdf(value),
            numeric => value
                .as_f64()
                .and_then(|x| numeric.numeric_cdf((x - self.offset) / self.scale)),
        }
    }

    /// Cumulative probability to raw value
    #[must_use]
    pub fn inverse_transform(&self, u: f64) -> AttributeValue {
        let identity = self.offset == 0.0 && self.scale == 1.0;
        match self.distribution.quantile(u) {
            AttributeValue::Number(x) => AttributeValue::Number(self.offset + self.scale * x),
            AttributeValue::Integer(k) if !identity => {
                AttributeValue::Number(self.offset + self.scale * k as f64)
            }
            other => other,
        }
    }
}
