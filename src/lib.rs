//! A Rust library for synthesizing correlated multi-attribute records from
//! distributions, conditional rules and Gaussian copulas fitted to survey data.

pub mod analysis;
pub mod config;
pub mod copula;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod utils;
pub mod value;

// Re-export the most common types for easier use
// Core types
pub use config::{CorrelationMethod, SynthesisConfig};
pub use error::{Result, SynthError};
pub use value::AttributeValue;

// Distributions
pub use distribution::{
    Beta, Binomial, Categorical, Continuous, Distribution, DistributionSpec, Exponential,
    LogNormal, Normal, Sampleable, SeededDistribution, Uniform,
};

// Generation
pub use generator::{
    AttributeSet, AttributeSpec, ConditionalRule, CorrelatedGenerator, CorrelationEdge,
    GenerationResult, generate,
};

// Analysis and joint sampling
pub use analysis::{CorrelationAnalyzer, CorrelationMatrix, DistributionFitting, SurveyData};
pub use copula::{GaussianCopula, JointDistribution, JointDistributionBuilder, MarginalDistribution};
