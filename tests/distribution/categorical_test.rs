//! Tests for categorical and binomial distributions

use pop_synth::distribution::{Binomial, Categorical, Continuous, Sampleable};
use pop_synth::AttributeValue;

use crate::utils::{mean_and_variance, seeded_rng};

#[test]
fn test_categorical_fidelity() {
    let categorical = Categorical::new([("low", 0.5), ("mid", 0.3), ("high", 0.2)]).unwrap();
    let mut rng = seeded_rng(77);
    let n = 100_000;
    let mut counts = [0usize; 3];
    for _ in 0..n {
        match categorical.sample(&mut rng) {
            "low" => counts[0] += 1,
            "mid" => counts[1] += 1,
            "high" => counts[2] += 1,
            other => panic!("unexpected outcome {other}"),
        }
    }
    for (count, expected) in counts.iter().zip([0.5, 0.3, 0.2]) {
        let frequency = *count as f64 / n as f64;
        assert!((frequency - expected).abs() <= 0.02, "{frequency} vs {expected}");
    }
}

#[test]
fn test_categorical_mode_and_validation() {
    let tied = Categorical::new([("a", 0.4), ("b", 0.4), ("c", 0.2)]).unwrap();
    assert_eq!(tied.mean(), "a");
    assert_eq!(tied.variance(), None);

    assert!(Categorical::new([("a", 0.6), ("b", 0.6)]).is_err());
    assert!(Categorical::<&str>::new([]).is_err());
    assert!(Categorical::new([("a", 1.2), ("b", -0.2)]).is_err());
}

#[test]
fn test_numeric_categorical_variance() {
    let dice = Categorical::new([
        (AttributeValue::Integer(1), 0.5),
        (AttributeValue::Integer(3), 0.5),
    ])
    .unwrap();
    assert_eq!(dice.variance(), Some(1.0));
}

#[test]
fn test_binomial_moments_and_pmf() {
    let binomial = Binomial::new(10, 0.3).unwrap();
    assert!((binomial.mean() - 3.0).abs() < 1e-12);
    assert!((binomial.variance().unwrap() - 2.1).abs() < 1e-12);
    let total: f64 = (0..=10).map(|k| binomial.pmf(k)).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert!((binomial.cdf(10.0) - 1.0).abs() < 1e-12);

    let mut rng = seeded_rng(3);
    let draws: Vec<f64> = (0..20_000).map(|_| binomial.sample(&mut rng)).collect();
    let (mean, _) = mean_and_variance(&draws);
    assert!((mean - 3.0).abs() < 0.05);
    assert!(draws.iter().all(|&k| (0.0..=10.0).contains(&k) && k.fract() == 0.0));
}

#[test]
fn test_binomial_validation() {
    assert!(Binomial::new(0, 0.5).is_err());
    assert!(Binomial::new(5, 1.5).is_err());
}
