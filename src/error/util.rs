//! Utility functions for error handling
//!
//! Parameter checks shared by the distribution constructors, the copula and
//! the configuration layer. Each returns `InvalidParameter` with a message
//! naming the offending parameter.

use crate::error::{Result, SynthError};

/// Create an invalid-parameter error
pub fn invalid<T>(message: impl Into<String>) -> Result<T> {
    Err(SynthError::InvalidParameter(message.into()))
}

/// Ensure a parameter is finite
///
/// # Arguments
/// * `name` - Parameter name used in the error message
/// * `value` - The value to check
pub fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        invalid(format!("{name} must be finite, got {value}"))
    }
}

/// Ensure a parameter is finite and strictly positive
pub fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        invalid(format!("{name} must be > 0, got {value}"))
    }
}

/// Ensure a parameter lies in the closed interval `[low, high]`
pub fn ensure_in_range(name: &str, value: f64, low: f64, high: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if (low..=high).contains(&value) {
        Ok(value)
    } else {
        invalid(format!("{name} must be in [{low}, {high}], got {value}"))
    }
}

/// Ensure a probability vector is non-negative and sums to one
///
/// A tolerance of `1e-6` is allowed on the total.
pub fn ensure_probabilities(probabilities: &[f64]) -> Result<()> {
    if probabilities.is_empty() {
        return invalid("categorical distribution needs at least one outcome");
    }
    for (i, &p) in probabilities.iter().enumerate() {
        if !p.is_finite() || p < 0.0 {
            return invalid(format!("probability #{i} must be a non-negative number, got {p}"));
        }
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > 1e-6 {
        return invalid(format!("probabilities must sum to 1, got {total}"));
    }
    Ok(())
}
