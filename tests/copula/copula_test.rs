//! Tests for the Gaussian copula

use pop_synth::analysis::calculate_correlations;
use pop_synth::{GaussianCopula, MarginalDistribution, Normal, SynthError, Uniform};

use crate::utils::{column, seeded_rng};

fn normal_and_uniform() -> Vec<MarginalDistribution> {
    vec![
        MarginalDistribution::new("z", Normal::new(0.0, 1.0).unwrap().into()),
        MarginalDistribution::new("u", Uniform::new(0.0, 1.0).unwrap().into()),
    ]
}

#[test]
fn test_copula_injects_correlation() {
    let copula =
        GaussianCopula::new(normal_and_uniform(), vec![vec![1.0, 0.9], vec![0.9, 1.0]]).unwrap();
    let mut rng = seeded_rng(5);
    let records = copula.sample(2_000, &mut rng);

    let matrix = calculate_correlations(&records, &["z", "u"]);
    let r = matrix.get("z", "u").unwrap();
    assert!(r >= 0.7, "measured correlation {r}");

    let uniform = column(&records, "u");
    assert!(uniform.iter().all(|u| (0.0..=1.0).contains(u)));
}

#[test]
fn test_identity_matrix_keeps_marginals_independent() {
    let copula =
        GaussianCopula::new(normal_and_uniform(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    let mut rng = seeded_rng(6);
    let records = copula.sample(2_000, &mut rng);
    let r = calculate_correlations(&records, &["z", "u"]).get("z", "u").unwrap();
    assert!(r.abs() < 0.1, "measured correlation {r}");
}

#[test]
fn test_non_positive_definite_matrix_is_repaired() {
    let marginals = vec![
        MarginalDistribution::new("a", Normal::new(0.0, 1.0).unwrap().into()),
        MarginalDistribution::new("b", Normal::new(0.0, 1.0).unwrap().into()),
        MarginalDistribution::new("c", Normal::new(0.0, 1.0).unwrap().into()),
    ];
    let target = vec![
        vec![1.0, 0.9, -0.9],
        vec![0.9, 1.0, 0.9],
        vec![-0.9, 0.9, 1.0],
    ];
    let copula = GaussianCopula::new(marginals, target.clone()).unwrap();
    assert_eq!(copula.correlation_matrix(), target.as_slice());

    let factor = copula.cholesky_factor();
    for (i, row) in factor.iter().enumerate() {
        assert!(row[i] > 0.0);
        assert!(row[i + 1..].iter().all(|&v| v == 0.0));
    }

    let mut rng = seeded_rng(7);
    let records = copula.sample(100, &mut rng);
    assert_eq!(records.len(), 100);
    assert!(column(&records, "a").iter().all(|v| v.is_finite()));
}

#[test]
fn test_invalid_matrices() {
    assert!(matches!(
        GaussianCopula::new(normal_and_uniform(), vec![vec![1.0]]),
        Err(SynthError::DimensionMismatch {
            expected: 2,
            found: 1
        })
    ));
    assert!(matches!(
        GaussianCopula::new(normal_and_uniform(), vec![vec![1.0, 0.5], vec![0.4, 1.0]]),
        Err(SynthError::InvalidParameter(_))
    ));
    assert!(matches!(
        GaussianCopula::new(normal_and_uniform(), vec![vec![1.0, 1.5], vec![1.5, 1.0]]),
        Err(SynthError::InvalidParameter(_))
    ));
    assert!(matches!(
        GaussianCopula::new(normal_and_uniform(), vec![vec![0.5, 0.0], vec![0.0, 1.0]]),
        Err(SynthError::InvalidParameter(_))
    ));
}
