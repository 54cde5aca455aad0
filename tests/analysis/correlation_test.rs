//! Tests for correlation matrices and non-linear screening

use pop_synth::analysis::{
    CorrelationAnalyzer, Record, calculate_correlations, calculate_spearman_correlations,
};
use pop_synth::distribution::{Normal, Sampleable};
use pop_synth::{AttributeValue, CorrelationMethod, SynthesisConfig};

use crate::utils::seeded_rng;

fn exponential_rows(n: usize) -> Vec<Record> {
    let noise = Normal::new(0.0, 0.3).unwrap();
    let mut rng = seeded_rng(12);
    (0..n)
        .map(|i| {
            let x = i as f64 / n as f64 * 6.0;
            let mut row = Record::default();
            row.insert("x".to_string(), AttributeValue::Number(x));
            row.insert("y".to_string(), AttributeValue::Number(x.exp()));
            row.insert(
                "noise".to_string(),
                AttributeValue::Number(noise.sample(&mut rng)),
            );
            row
        })
        .collect()
}

#[test]
fn test_spearman_sees_monotone_relation() {
    let rows = exponential_rows(300);
    let pearson = calculate_correlations(&rows, &["x", "y"]);
    let spearman = calculate_spearman_correlations(&rows, &["x", "y"]);
    let r_pearson = pearson.get("x", "y").unwrap();
    let r_spearman = spearman.get("x", "y").unwrap();
    assert!((r_spearman - 1.0).abs() < 1e-12);
    assert!(r_pearson < r_spearman);
    assert!(pearson.p_value("x", "y").unwrap() < 1e-6);
}

#[test]
fn test_noise_is_insignificant() {
    let rows = exponential_rows(300);
    let matrix = calculate_correlations(&rows, &["x", "noise"]);
    let r = matrix.get("x", "noise").unwrap();
    assert!(r.abs() < 0.2, "{r}");
    assert_eq!(matrix.sample_sizes()[0][1], 300);
}

#[test]
fn test_analyzer_uses_configured_method() {
    let rows = exponential_rows(100);
    let analyzer = CorrelationAnalyzer::new(SynthesisConfig {
        correlation_method: CorrelationMethod::Spearman,
        ..SynthesisConfig::default()
    });
    let matrix = analyzer.correlations(&rows, &["x", "y"]);
    assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_too_few_pairs_are_neutral() {
    let rows: Vec<Record> = (0..2)
        .map(|i| {
            let mut row = Record::default();
            row.insert("a".to_string(), AttributeValue::Number(f64::from(i)));
            row.insert("b".to_string(), AttributeValue::Number(f64::from(i)));
            row
        })
        .collect();
    let matrix = calculate_correlations(&rows, &["a", "b"]);
    assert_eq!(matrix.get("a", "b"), Some(0.0));
    assert_eq!(matrix.p_value("a", "b"), Some(1.0));
}

#[test]
fn test_non_linear_detection() {
    let rows: Vec<Record> = (0..400)
        .map(|i| {
            let angle = f64::from(i) / 400.0 * std::f64::consts::TAU;
            let mut row = Record::default();
            row.insert("angle".to_string(), AttributeValue::Number(angle));
            row.insert("wave".to_string(), AttributeValue::Number(angle.cos()));
            row
        })
        .collect();
    let pairs =
        CorrelationAnalyzer::default().detect_non_linear_correlations(&rows, &["angle", "wave"]);
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].is_non_linear, "{:?}", pairs[0]);
}
