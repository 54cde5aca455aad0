//! Joint distributions learned from survey data

use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use super::gaussian::GaussianCopula;
use super::marginal::MarginalDistribution;
use crate::analysis::CorrelationAnalyzer;
use crate::analysis::data::{FieldType, Record, SurveyData};
use crate::config::SynthesisConfig;
use crate::error::{Result, SynthError};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};
use crate::utils::rng::{rng_from_seed, task_rng};

/// Marginals joined by a Gaussian copula, ready for sampling
#[derive(Debug, Clone, Serialize)]
pub struct JointDistribution {
    copula: GaussianCopula,
    #[serde(skip)]
    config: SynthesisConfig,
}

impl JointDistribution {
    #[must_use]
    pub fn new(copula: GaussianCopula, config: SynthesisConfig) -> Self {
        Self { copula, config }
    }

    /// Join marginals with a target correlation matrix
    pub fn from_marginals(
        marginals: Vec<MarginalDistribution>,
        correlation_matrix: Vec<Vec<f64>>,
    ) -> Result<Self> {
        Ok(Self::new(
            GaussianCopula::new(marginals, correlation_matrix)?,
            SynthesisConfig::default(),
        ))
    }

    #[must_use]
    pub fn copula(&self) -> &GaussianCopula {
        &self.copula
    }

    #[must_use]
    pub fn marginals(&self) -> &[MarginalDistribution] {
        self.copula.marginals()
    }

    /// Variable names in column order
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        self.marginals().iter().map(MarginalDistribution::variable).collect()
    }

    #[must_use]
    pub fn correlation_matrix(&self) -> &[Vec<f64>] {
        self.copula.correlation_matrix()
    }

    /// Draw `n` records using the configured seed, or OS entropy without one
    #[must_use]
    pub fn sample(&self, n: usize) -> Vec<Record> {
        let mut rng = rng_from_seed(self.config.seed);
        self.copula.sample(n, &mut rng)
    }

    /// Draw `n` records from a stream seeded with `seed`
    #[must_use]
    pub fn sample_seeded(&self, n: usize, seed: u64) -> Vec<Record> {
        let mut rng = rng_from_seed(Some(seed));
        self.copula.sample(n, &mut rng)
    }

    /// Draw `n` records in parallel chunks
    ///
    /// Chunk `i` uses a stream seeded with `seed + i`, so the output only
    /// depends on the seed and the configured chunk size.
    #[must_use]
    pub fn sample_batch(&self, n: usize, seed: Option<u64>) -> Vec<Record> {
        let chunk_size = self.config.batch_chunk_size.max(1);
        let chunk_count = n.div_ceil(chunk_size);
        (0..chunk_count)
            .into_par_iter()
            .flat_map_iter(|index| {
                let len = chunk_size.min(n - index * chunk_size);
                let mut rng = task_rng(seed, index);
                self.copula.sample(len, &mut rng)
            })
            .collect()
    }
}

/// Builds a [`JointDistribution`] from observed data
#[derive(Debug, Clone, Default)]
pub struct JointDistributionBuilder {
    analyzer: CorrelationAnalyzer,
}

impl JointDistributionBuilder {
    #[must_use]
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            analyzer: CorrelationAnalyzer::new(config),
        }
    }

    /// Fit marginals and a correlation matrix for every usable column
    ///
    /// Numeric columns get their best-fitting family; categorical, ordinal
    /// and boolean columns get empirical categorical marginals (ordinal
    /// outcomes sorted). Columns without enough data are skipped with a
    /// warning. Correlations are measured between numeric columns only;
    /// every other pair is independent in the copula.
    pub fn from_survey(&self, data: &SurveyData) -> Result<JointDistribution> {
        let start = Instant::now();
        log_operation_start("Building joint distribution for", &format!("{} rows", data.rows.len()));
        data.validate()?;

        let fits = self.analyzer.fit_all(data);
        let mut marginals = Vec::new();
        let mut numeric = Vec::new();

        for (field, schema) in &data.schema {
            let marginal = match schema.field_type {
                FieldType::Numeric => match fits.get(field) {
                    Some(fitting) => MarginalDistribution::from_fitting(fitting),
                    None => continue,
                },
                FieldType::Categorical | FieldType::Ordinal | FieldType::Boolean => {
                    let sort = schema.field_type == FieldType::Ordinal;
                    match MarginalDistribution::empirical(field.as_str(), data.values(field), sort) {
                        Ok(marginal) => marginal,
                        Err(err) => {
                            log_warning(&format!("Skipping column ({err})"), Some(field));
                            continue;
                        }
                    }
                }
            };
            if schema.field_type.is_numeric() {
                numeric.push((marginals.len(), field.as_str()));
            }
            marginals.push(marginal);
        }

        if marginals.is_empty() {
            return Err(SynthError::InvalidParameter(
                "survey has no columns that can be modelled".to_string(),
            ));
        }

        let names: Vec<&str> = numeric.iter().map(|&(_, name)| name).collect();
        let measured = self.analyzer.correlations(&data.rows, &names);
        let n = marginals.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        for (a, &(i, _)) in numeric.iter().enumerate() {
            for (b, &(j, _)) in numeric.iter().enumerate() {
                matrix[i][j] = measured.matrix()[a][b];
            }
        }

        let copula = GaussianCopula::new(marginals, matrix)?;
        log_operation_complete("modelled", "survey columns", n, Some(start.elapsed()));
        Ok(JointDistribution::new(copula, self.analyzer.config().clone()))
    }
}
