//! Tests for the normal, uniform, exponential and log-normal primitives

use pop_synth::distribution::{Continuous, Exponential, LogNormal, Normal, Sampleable, Uniform};
use pop_synth::SynthError;

use crate::utils::{mean_and_variance, seeded_rng};

#[test]
fn test_normal_marginal_fidelity() {
    let normal = Normal::new(35.0, 7.0).unwrap();
    let mut rng = seeded_rng(2024);
    let draws: Vec<f64> = (0..100_000).map(|_| normal.sample(&mut rng)).collect();
    let (mean, variance) = mean_and_variance(&draws);
    assert!((34.5..=35.5).contains(&mean), "mean {mean}");
    assert!((44.0..=54.0).contains(&variance), "variance {variance}");
    assert_eq!(normal.mean(), 35.0);
    assert_eq!(normal.variance(), Some(49.0));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    assert!(matches!(
        Normal::new(0.0, -1.0),
        Err(SynthError::InvalidParameter(_))
    ));
    assert!(Uniform::new(5.0, 1.0).is_err());
    assert!(Uniform::new(f64::NEG_INFINITY, 1.0).is_err());
    assert!(Exponential::new(0.0).is_err());
    assert!(LogNormal::new(0.0, 0.0).is_err());
}

#[test]
fn test_degenerate_uniform() {
    let constant = Uniform::new(3.0, 3.0).unwrap();
    let mut rng = seeded_rng(1);
    assert_eq!(constant.sample(&mut rng), 3.0);
    assert_eq!(constant.variance(), Some(0.0));
}

#[test]
fn test_exponential_moments_and_quantile() {
    let exponential = Exponential::new(0.5).unwrap();
    assert_eq!(exponential.mean(), 2.0);
    assert_eq!(exponential.variance(), Some(4.0));
    let median = exponential.quantile(0.5);
    assert!((exponential.cdf(median) - 0.5).abs() < 1e-12);

    let mut rng = seeded_rng(8);
    let draws: Vec<f64> = (0..50_000).map(|_| exponential.sample(&mut rng)).collect();
    let (mean, _) = mean_and_variance(&draws);
    assert!((mean - 2.0).abs() < 0.05);
    assert!(draws.iter().all(|&v| v >= 0.0));
}

#[test]
fn test_lognormal_mean() {
    let lognormal = LogNormal::new(0.0, 0.5).unwrap();
    let expected = (0.125_f64).exp();
    assert!((lognormal.mean() - expected).abs() < 1e-12);
    let mut rng = seeded_rng(5);
    let draws: Vec<f64> = (0..50_000).map(|_| lognormal.sample(&mut rng)).collect();
    let (mean, _) = mean_and_variance(&draws);
    assert!((mean - expected).abs() < 0.02);
}
