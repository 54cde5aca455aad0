//! Tests for the beta distribution

use pop_synth::distribution::{Beta, Continuous, Sampleable};

use crate::utils::{mean_and_variance, seeded_rng};

#[test]
fn test_beta_two_five_moments() {
    let beta = Beta::new(2.0, 5.0).unwrap();
    assert!((beta.mean() - 2.0 / 7.0).abs() < 1e-12);
    assert!((beta.mean() - 0.2857).abs() < 1e-4);
    let expected_variance = 10.0 / (49.0 * 8.0);
    assert!((beta.variance().unwrap() - expected_variance).abs() < 1e-12);
    assert!((beta.variance().unwrap() - 0.01276).abs() < 1e-5);
}

#[test]
fn test_beta_sampling_matches_moments() {
    let beta = Beta::new(2.0, 5.0).unwrap();
    let mut rng = seeded_rng(31);
    let draws: Vec<f64> = (0..50_000).map(|_| beta.sample(&mut rng)).collect();
    let (mean, variance) = mean_and_variance(&draws);
    assert!((mean - 2.0 / 7.0).abs() < 0.005, "mean {mean}");
    assert!((variance - 10.0 / 392.0).abs() < 0.001, "variance {variance}");
    assert!(draws.iter().all(|&x| (0.0..=1.0).contains(&x)));
}

#[test]
fn test_beta_small_shapes() {
    // Shapes below one exercise the boosted gamma sampler
    let beta = Beta::new(0.5, 0.5).unwrap();
    let mut rng = seeded_rng(9);
    let draws: Vec<f64> = (0..50_000).map(|_| beta.sample(&mut rng)).collect();
    let (mean, _) = mean_and_variance(&draws);
    assert!((mean - 0.5).abs() < 0.01);
}

#[test]
fn test_beta_cdf_and_quantile() {
    let beta = Beta::new(2.0, 5.0).unwrap();
    // I_x(2, 5) has the closed form 1 - (1 - x)^5 (1 + 5x)
    let x = 0.3_f64;
    let exact = 1.0 - (1.0 - x).powi(5) * (1.0 + 5.0 * x);
    assert!((beta.cdf(x) - exact).abs() < 1e-10);
    assert!((beta.quantile(exact) - x).abs() < 1e-8);
    assert!(Beta::new(0.0, 1.0).is_err());
}
