//! Distribution fitting with a Kolmogorov–Smirnov goodness-of-fit score

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::distribution::{
    Beta, Distribution, Exponential, LogNormal, Normal, Sampleable, Uniform,
};
use crate::error::{Result, SynthError};

/// Families considered when fitting a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionFamily {
    Normal,
    Uniform,
    Exponential,
    Beta,
    LogNormal,
}

impl DistributionFamily {
    /// Every supported family, in the order they are tried
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Uniform,
        Self::Exponential,
        Self::Beta,
        Self::LogNormal,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Uniform => "uniform",
            Self::Exponential => "exponential",
            Self::Beta => "beta",
            Self::LogNormal => "lognormal",
        }
    }
}

impl fmt::Display for DistributionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fitted candidate
///
/// Beta candidates are fitted on min–max rescaled data; `offset` and `scale`
/// map raw values onto the distribution's support as `(x - offset) / scale`.
/// Other families use the identity (`offset = 0`, `scale = 1`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedDistribution {
    pub family: DistributionFamily,
    /// Description with parameters, e.g. `Normal(mean=35, std_dev=7)`
    pub name: String,
    pub parameters: BTreeMap<String, f64>,
    /// KS statistic, lower is better
    pub goodness_of_fit: f64,
    pub distribution: Distribution,
    pub offset: f64,
    pub scale: f64,
}

impl FittedDistribution {
    /// Fitted CDF on the raw scale
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        self.distribution
            .numeric_cdf((x - self.offset) / self.scale)
            .unwrap_or(0.0)
    }
}

/// Fitting outcome for one variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionFitting {
    pub variable: String,
    pub best_fit: FittedDistribution,
    /// Remaining candidates, best first
    pub alternatives: Vec<FittedDistribution>,
}

/// Sample moments with the `n - 1` variance
fn moments(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

/// Largest gap between the empirical and fitted CDF
///
/// `sorted` must be ascending. The empirical CDF is evaluated at each unique
/// value as the share of observations at or below it.
#[must_use]
pub fn ks_statistic<F: Fn(f64) -> f64>(sorted: &[f64], cdf: F) -> f64 {
    let n = sorted.len() as f64;
    let mut max_gap: f64 = 0.0;
    let mut i = 0;
    while i < sorted.len() {
        let x = sorted[i];
        while i < sorted.len() && sorted[i] == x {
            i += 1;
        }
        let empirical = i as f64 / n;
        max_gap = max_gap.max((empirical - cdf(x)).abs());
    }
    max_gap
}

/// Estimate one family's parameters; `None` when the family cannot fit
fn estimate(family: DistributionFamily, sorted: &[f64]) -> Option<(Distribution, f64, f64)> {
    let (mean, variance) = moments(sorted);
    let min = *sorted.first()?;
    let max = *sorted.last()?;

    let fitted: (Distribution, f64, f64) = match family {
        DistributionFamily::Normal => (Normal::new(mean, variance.sqrt()).ok()?.into(), 0.0, 1.0),
        DistributionFamily::Uniform => (Uniform::new(min, max).ok()?.into(), 0.0, 1.0),
        DistributionFamily::Exponential => {
            if mean <= 0.0 || min < 0.0 {
                return None;
            }
            (Exponential::new(1.0 / mean).ok()?.into(), 0.0, 1.0)
        }
        DistributionFamily::Beta => {
            let range = max - min;
            if range <= 0.0 {
                return None;
            }
            let m = (mean - min) / range;
            let v = variance / (range * range);
            if v <= 0.0 || v >= m * (1.0 - m) {
                return None;
            }
            let common = m * (1.0 - m) / v - 1.0;
            (Beta::new(m * common, (1.0 - m) * common).ok()?.into(), min, range)
        }
        DistributionFamily::LogNormal => {
            if min <= 0.0 {
                return None;
            }
            let logs: Vec<f64> = sorted.iter().map(|v| v.ln()).collect();
            let (mu, log_variance) = moments(&logs);
            (LogNormal::new(mu, log_variance.sqrt()).ok()?.into(), 0.0, 1.0)
        }
    };
    Some(fitted)
}

pub(crate) fn distribution_parameters(
    distribution: &Distribution,
    offset: f64,
    scale: f64,
) -> BTreeMap<String, f64> {
    let mut parameters = BTreeMap::new();
    let mut put = |key: &str, value: f64| {
        parameters.insert(key.to_string(), value);
    };
    match distribution {
        Distribution::Normal(d) => {
            put("mean", d.mu());
            put("std_dev", d.sigma());
        }
        Distribution::Uniform(d) => {
            put("min", d.min());
            put("max", d.max());
        }
        Distribution::Exponential(d) => put("rate", d.rate()),
        Distribution::Beta(d) => {
            put("alpha", d.alpha());
            put("beta", d.beta());
            put("offset", offset);
            put("scale", scale);
        }
        Distribution::LogNormal(d) => {
            put("mu", d.mu());
            put("sigma", d.sigma());
        }
        Distribution::Binomial(_) | Distribution::Categorical(_) => {}
    }
    parameters
}

/// Fit candidate families to a column and rank them by KS statistic
///
/// Non-finite values are ignored. At least `min_samples` values are needed.
pub fn fit_with_minimum(
    variable: &str,
    values: &[f64],
    candidates: Option<&[DistributionFamily]>,
    min_samples: usize,
) -> Result<DistributionFitting> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.len() < min_samples {
        return Err(SynthError::InsufficientSample {
            variable: variable.to_string(),
            found: sorted.len(),
            required: min_samples,
        });
    }
    sorted.sort_by(f64::total_cmp);

    let candidates = candidates.unwrap_or(&DistributionFamily::ALL);
    let mut fits: Vec<FittedDistribution> = candidates
        .iter()
        .filter_map(|&family| {
            let (distribution, offset, scale) = estimate(family, &sorted)?;
            let goodness_of_fit = ks_statistic(&sorted, |x| {
                distribution
                    .numeric_cdf((x - offset) / scale)
                    .unwrap_or(0.0)
            });
            Some(FittedDistribution {
                family,
                name: distribution.describe(),
                parameters: distribution_parameters(&distribution, offset, scale),
                goodness_of_fit,
                distribution,
                offset,
                scale,
            })
        })
        .collect();

    if fits.is_empty() {
        return Err(SynthError::InvalidParameter(format!(
            "no candidate distribution can be fitted to {variable}"
        )));
    }
    fits.sort_by(|a, b| a.goodness_of_fit.total_cmp(&b.goodness_of_fit));
    let best_fit = fits.remove(0);
    log::debug!(
        "Best fit for {variable}: {} (KS = {:.4})",
        best_fit.name,
        best_fit.goodness_of_fit
    );

    Ok(DistributionFitting {
        variable: variable.to_string(),
        best_fit,
        alternatives: fits,
    })
}

/// Fit with the default minimum of 11 values
pub fn fit_distribution(
    variable: &str,
    values: &[f64],
    candidates: Option<&[DistributionFamily]>,
) -> Result<DistributionFitting> {
    fit_with_minimum(variable, values, candidates, 11)
}
