//! Gaussian copula over arbitrary marginals

use rand::Rng;
use serde::Serialize;

use super::cholesky::factorize;
use super::marginal::MarginalDistribution;
use crate::analysis::data::Record;
use crate::distribution::special::{normal_cdf, standard_normal};
use crate::error::util::ensure_in_range;
use crate::error::{Result, SynthError};
use crate::value::AttributeValue;

/// Probabilities are kept inside `(EPSILON, 1 - EPSILON)` before inversion
const EPSILON: f64 = 1e-12;
const TOLERANCE: f64 = 1e-9;

/// Copula family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopulaType {
    Gaussian,
}

/// Dependence parameters of a copula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopulaParameters {
    pub copula_type: CopulaType,
    /// Target correlation matrix as supplied
    pub correlation_matrix: Vec<Vec<f64>>,
}

/// Joins marginals through a multivariate normal with a target correlation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaussianCopula {
    marginals: Vec<MarginalDistribution>,
    parameters: CopulaParameters,
    #[serde(skip)]
    cholesky: Vec<Vec<f64>>,
}

fn validate_matrix(matrix: &[Vec<f64>], expected: usize) -> Result<()> {
    if matrix.len() != expected {
        return Err(SynthError::DimensionMismatch {
            expected,
            found: matrix.len(),
        });
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != expected) {
        return Err(SynthError::DimensionMismatch {
            expected,
            found: row.len(),
        });
    }
    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            ensure_in_range(&format!("correlation[{i}][{j}]"), value, -1.0, 1.0)?;
            if (value - matrix[j][i]).abs() > TOLERANCE {
                return Err(SynthError::InvalidParameter(format!(
                    "correlation matrix is not symmetric at ({i}, {j})"
                )));
            }
        }
        if (row[i] - 1.0).abs() > TOLERANCE {
            return Err(SynthError::InvalidParameter(format!(
                "correlation matrix diagonal must be 1, got {} at {i}",
                row[i]
            )));
        }
    }
    Ok(())
}

impl GaussianCopula {
    /// Validate the target matrix against the marginals and factorize it
    ///
    /// A matrix that is valid entry-wise but not positive definite is
    /// replaced by its nearest positive-definite correlation matrix for
    /// sampling; [`Self::correlation_matrix`] still returns the target.
    pub fn new(
        marginals: Vec<MarginalDistribution>,
        correlation_matrix: Vec<Vec<f64>>,
    ) -> Result<Self> {
        validate_matrix(&correlation_matrix, marginals.len())?;
        let cholesky = factorize(&correlation_matrix)?;
        Ok(Self {
            marginals,
            parameters: CopulaParameters {
                copula_type: CopulaType::Gaussian,
                correlation_matrix,
            },
            cholesky,
        })
    }

    #[must_use]
    pub fn marginals(&self) -> &[MarginalDistribution] {
        &self.marginals
    }

    #[must_use]
    pub fn parameters(&self) -> &CopulaParameters {
        &self.parameters
    }

    /// The target correlation matrix, unchanged
    #[must_use]
    pub fn correlation_matrix(&self) -> &[Vec<f64>] {
        &self.parameters.correlation_matrix
    }

    /// Lower-triangular factor used for sampling
    #[must_use]
    pub fn cholesky_factor(&self) -> &[Vec<f64>] {
        &self.cholesky
    }

    /// Draw one vector of values, aligned with the marginals
    pub fn sample_values<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<AttributeValue> {
        let independent: Vec<f64> = (0..self.marginals.len())
            .map(|_| standard_normal(rng))
            .collect();

        self.cholesky
            .iter()
            .zip(&self.marginals)
            .map(|(row, marginal)| {
                let correlated: f64 = row.iter().zip(&independent).map(|(l, z)| l * z).sum();
                let u = normal_cdf(correlated).clamp(EPSILON, 1.0 - EPSILON);
                marginal.inverse_transform(u)
            })
            .collect()
    }

    /// Draw one record keyed by variable name
    pub fn sample_record<R: Rng + ?Sized>(&self, rng: &mut R) -> Record {
        self.marginals
            .iter()
            .map(|m| m.variable().to_string())
            .zip(self.sample_values(rng))
            .collect()
    }

    /// Draw `n` records
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Record> {
        (0..n).map(|_| self.sample_record(rng)).collect()
    }
}
