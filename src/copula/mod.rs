//! Gaussian copula joint sampling
//!
//! Correlation is injected with the Cholesky factor of the target matrix;
//! matrices that are not positive definite are repaired through an eigen
//! decomposition first.

pub mod cholesky;
pub mod gaussian;
pub mod joint;
pub mod marginal;

pub use gaussian::{CopulaParameters, CopulaType, GaussianCopula};
pub use joint::{JointDistribution, JointDistributionBuilder};
pub use marginal::MarginalDistribution;
