//! Error handling for the synthesis engine.
//!
//! Only construction-time problems are hard errors. Runtime issues during
//! generation (unknown attributes, stalled dependency resolution) are logged
//! as warnings and degrade to best-effort values instead.

pub mod util;

/// Specialized error type for the synthesis engine
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// A distribution, edge or matrix violated one of its invariants
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A column had too few numeric observations to fit a distribution
    #[error("Insufficient sample for '{variable}': found {found} numeric values, need at least {required}")]
    InsufficientSample {
        /// Name of the column being fitted
        variable: String,
        /// Number of usable values found
        found: usize,
        /// Minimum number of values required
        required: usize,
    },

    /// Conditional rules form a cycle and strict dependency checking is enabled
    #[error("Cyclic dependency between attributes: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    /// Matrix or marginal dimensions do not agree
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Dimension that was supplied
        found: usize,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error (de)serializing configuration or records
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for synthesis operations
pub type Result<T> = std::result::Result<T, SynthError>;
