//! Tests for distribution fitting

use pop_synth::analysis::{
    CorrelationAnalyzer, DistributionFamily, FieldSchema, FieldType, Record, SurveyData,
    fit_distribution,
};
use pop_synth::distribution::{Exponential, Normal, Sampleable};
use pop_synth::{AttributeValue, SynthError};
use std::collections::BTreeMap;

use crate::utils::seeded_rng;

const CANDIDATES: [DistributionFamily; 4] = [
    DistributionFamily::Normal,
    DistributionFamily::Uniform,
    DistributionFamily::Exponential,
    DistributionFamily::LogNormal,
];

#[test]
fn test_recovers_normal() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut rng = seeded_rng(21);
    let values: Vec<f64> = (0..2_000).map(|_| normal.sample(&mut rng)).collect();
    let fitting = fit_distribution("z", &values, Some(&CANDIDATES)).unwrap();
    assert_eq!(fitting.best_fit.family, DistributionFamily::Normal);
    assert!(fitting.best_fit.goodness_of_fit < 0.05);
    assert!(fitting.best_fit.parameters["mean"].abs() < 0.1);
    assert!((fitting.best_fit.parameters["std_dev"] - 1.0).abs() < 0.1);
    // Negative values rule out exponential and log-normal
    assert_eq!(fitting.alternatives.len(), 1);
}

#[test]
fn test_recovers_exponential() {
    let exponential = Exponential::new(2.0).unwrap();
    let mut rng = seeded_rng(22);
    let values: Vec<f64> = (0..2_000).map(|_| exponential.sample(&mut rng)).collect();
    let fitting = fit_distribution("wait", &values, Some(&CANDIDATES)).unwrap();
    assert_eq!(fitting.best_fit.family, DistributionFamily::Exponential);
    assert!((fitting.best_fit.parameters["rate"] - 2.0).abs() < 0.2);
    assert!(
        fitting
            .alternatives
            .iter()
            .all(|alt| alt.goodness_of_fit >= fitting.best_fit.goodness_of_fit)
    );
}

#[test]
fn test_all_families_rank_consistently() {
    let normal = Normal::new(100.0, 15.0).unwrap();
    let mut rng = seeded_rng(23);
    let values: Vec<f64> = (0..1_000).map(|_| normal.sample(&mut rng)).collect();
    let fitting = fit_distribution("iq", &values, None).unwrap();
    assert_eq!(fitting.alternatives.len(), 4);
    let beta = std::iter::once(&fitting.best_fit)
        .chain(&fitting.alternatives)
        .find(|f| f.family == DistributionFamily::Beta)
        .unwrap();
    assert!(beta.parameters.contains_key("offset"));
    assert!(beta.cdf(beta.offset) <= 1e-12);
}

#[test]
fn test_small_columns_are_rejected() {
    let values: Vec<f64> = (0..10).map(f64::from).collect();
    assert!(matches!(
        fit_distribution("small", &values, None),
        Err(SynthError::InsufficientSample { found: 10, .. })
    ));
    let values: Vec<f64> = (0..11).map(f64::from).collect();
    assert!(fit_distribution("enough", &values, None).is_ok());
}

#[test]
fn test_fit_all_report() {
    let normal = Normal::new(50.0, 5.0).unwrap();
    let mut rng = seeded_rng(24);
    let rows: Vec<Record> = (0..100)
        .map(|i| {
            let mut row = Record::default();
            row.insert("score".to_string(), AttributeValue::Number(normal.sample(&mut rng)));
            if i % 20 == 0 {
                row.insert("sparse".to_string(), AttributeValue::Number(f64::from(i)));
            }
            row
        })
        .collect();
    let mut schema = BTreeMap::new();
    schema.insert("score".to_string(), FieldSchema::new(FieldType::Numeric));
    schema.insert("sparse".to_string(), FieldSchema::new(FieldType::Numeric));

    let report = CorrelationAnalyzer::default().fit_all(&SurveyData::new(rows, schema));
    assert!(report.get("score").is_some());
    assert!(report.get("sparse").is_none());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("sparse"));
}
