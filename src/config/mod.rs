//! Configuration for the synthesis engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SynthError};

/// Which coefficient the joint-distribution builder uses for its target matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Pearson product-moment correlation
    #[default]
    Pearson,
    /// Spearman rank correlation
    Spearman,
}

/// Configuration for generation, fitting and copula sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Base seed for reproducible generation (`None` draws from OS entropy)
    pub seed: Option<u64>,
    /// Upper bound on dependency-resolution passes per record
    pub max_resolution_passes: usize,
    /// Reject cyclic conditional rules instead of falling back to base distributions
    pub strict_dependencies: bool,
    /// Minimum number of numeric values needed to fit a column
    pub min_fit_samples: usize,
    /// Number of equal-width bins per axis for mutual information
    pub mutual_information_bins: usize,
    /// Normalized mutual information above which a pair counts as dependent
    pub nonlinear_mi_threshold: f64,
    /// Absolute Pearson coefficient below which a dependent pair counts as non-linear
    pub linear_cutoff: f64,
    /// Coefficient used for the copula target matrix
    pub correlation_method: CorrelationMethod,
    /// Records per rayon task in batch generation
    pub batch_chunk_size: usize,
    /// Show a progress bar during batch generation
    pub show_progress: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_resolution_passes: 10,
            strict_dependencies: false,
            min_fit_samples: 11,
            mutual_information_bins: 10,
            nonlinear_mi_threshold: 0.3,
            linear_cutoff: 0.3,
            correlation_method: CorrelationMethod::Pearson,
            batch_chunk_size: 1024,
            show_progress: false,
        }
    }
}

impl SynthesisConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Return a copy with the given seed
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_resolution_passes == 0 {
            return Err(SynthError::Config(
                "max_resolution_passes must be at least 1".to_string(),
            ));
        }
        if self.min_fit_samples < 2 {
            return Err(SynthError::Config(
                "min_fit_samples must be at least 2".to_string(),
            ));
        }
        if self.mutual_information_bins < 2 {
            return Err(SynthError::Config(
                "mutual_information_bins must be at least 2".to_string(),
            ));
        }
        if self.batch_chunk_size == 0 {
            return Err(SynthError::Config(
                "batch_chunk_size must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("nonlinear_mi_threshold", self.nonlinear_mi_threshold),
            ("linear_cutoff", self.linear_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SynthError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for SynthesisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Synthesis Configuration:")?;
        if let Some(seed) = self.seed {
            writeln!(f, "  Seed: {seed}")?;
        }
        writeln!(f, "  Max Resolution Passes: {}", self.max_resolution_passes)?;
        writeln!(f, "  Strict Dependencies: {}", self.strict_dependencies)?;
        writeln!(f, "  Min Fit Samples: {}", self.min_fit_samples)?;
        writeln!(f, "  MI Bins: {}", self.mutual_information_bins)?;
        writeln!(f, "  Correlation Method: {:?}", self.correlation_method)?;
        writeln!(f, "  Batch Chunk Size: {}", self.batch_chunk_size)?;
        Ok(())
    }
}
