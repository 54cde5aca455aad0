//! Correlation and distribution-fit analysis of observed survey data

pub mod correlation;
pub mod data;
pub mod fitting;
pub mod nonlinear;

use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use crate::config::{CorrelationMethod, SynthesisConfig};
use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

pub use correlation::{
    CorrelationMatrix, average_ranks, calculate_correlations, calculate_spearman_correlations,
    correlation_p_value, pearson, spearman,
};
pub use data::{FieldSchema, FieldType, Record, SurveyData, numeric_column};
pub use fitting::{
    DistributionFamily, DistributionFitting, FittedDistribution, fit_distribution,
    fit_with_minimum, ks_statistic,
};
pub use nonlinear::{NonLinearCorrelation, detect_non_linear_correlations, mutual_information};

/// A column left out of a bulk fit, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedColumn {
    pub variable: String,
    pub reason: String,
}

/// Results of fitting every numeric column of a survey
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FitReport {
    pub fitted: Vec<DistributionFitting>,
    pub skipped: Vec<SkippedColumn>,
}

impl FitReport {
    /// Fitting for a variable, if it was fitted
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&DistributionFitting> {
        self.fitted.iter().find(|f| f.variable == variable)
    }
}

/// Analyzer bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalyzer {
    config: SynthesisConfig,
}

impl CorrelationAnalyzer {
    #[must_use]
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Pearson correlation matrix
    pub fn calculate_correlations<S: AsRef<str>>(
        &self,
        rows: &[Record],
        variables: &[S],
    ) -> CorrelationMatrix {
        calculate_correlations(rows, variables)
    }

    /// Spearman correlation matrix
    pub fn calculate_spearman_correlations<S: AsRef<str>>(
        &self,
        rows: &[Record],
        variables: &[S],
    ) -> CorrelationMatrix {
        calculate_spearman_correlations(rows, variables)
    }

    /// Correlation matrix using the configured method
    pub fn correlations<S: AsRef<str>>(&self, rows: &[Record], variables: &[S]) -> CorrelationMatrix {
        match self.config.correlation_method {
            CorrelationMethod::Pearson => calculate_correlations(rows, variables),
            CorrelationMethod::Spearman => calculate_spearman_correlations(rows, variables),
        }
    }

    /// Mutual-information screening with the configured bins and thresholds
    pub fn detect_non_linear_correlations<S: AsRef<str>>(
        &self,
        rows: &[Record],
        variables: &[S],
    ) -> Vec<NonLinearCorrelation> {
        detect_non_linear_correlations(
            rows,
            variables,
            self.config.mutual_information_bins,
            self.config.nonlinear_mi_threshold,
            self.config.linear_cutoff,
        )
    }

    /// Fit one column, requiring the configured minimum sample
    pub fn fit_distribution(
        &self,
        variable: &str,
        values: &[f64],
        candidates: Option<&[DistributionFamily]>,
    ) -> Result<DistributionFitting> {
        fit_with_minimum(variable, values, candidates, self.config.min_fit_samples)
    }

    /// Fit every numeric column of the survey
    ///
    /// Columns that cannot be fitted are logged and listed in the report's
    /// `skipped` entries; they never fail the whole analysis.
    pub fn fit_all(&self, data: &SurveyData) -> FitReport {
        let start = Instant::now();
        let fields = data.numeric_fields();
        log_operation_start("Fitting distributions for", &format!("{} columns", fields.len()));

        let outcomes: Vec<(String, Result<DistributionFitting>)> = fields
            .par_iter()
            .map(|&field| {
                let values = data.numeric_values(field);
                (field.to_string(), self.fit_distribution(field, &values, None))
            })
            .collect();

        let mut report = FitReport::default();
        for (variable, outcome) in outcomes {
            match outcome {
                Ok(fitting) => report.fitted.push(fitting),
                Err(err) => {
                    log_warning(&format!("Skipping column ({err})"), Some(&variable));
                    report.skipped.push(SkippedColumn {
                        variable,
                        reason: err.to_string(),
                    });
                }
            }
        }

        log_operation_complete(
            "fitted",
            "numeric columns",
            report.fitted.len(),
            Some(start.elapsed()),
        );
        report
    }
}
