//! End-to-end tests: generate a survey, learn it, sample it back

use pop_synth::analysis::{FieldSchema, FieldType, pearson};
use pop_synth::{
    AttributeSet, AttributeValue, Categorical, CorrelatedGenerator, CorrelationEdge, JointDistributionBuilder,
    Normal, SurveyData, SynthesisConfig, Uniform,
};
use std::collections::BTreeMap;

use crate::utils::{column, to_rows};

fn survey() -> SurveyData {
    let attributes = AttributeSet::new()
        .with("age", Uniform::new(20.0, 60.0).unwrap())
        .with("income", Normal::new(40_000.0, 8_000.0).unwrap())
        .with(
            "region",
            Categorical::new([
                (AttributeValue::from("north"), 0.3),
                (AttributeValue::from("south"), 0.7),
            ])
            .unwrap(),
        );
    let generator = CorrelatedGenerator::new(attributes)
        .with_config(SynthesisConfig::default().with_seed(99))
        .with_correlation(CorrelationEdge::new("age", "income", 0.7).unwrap());
    let records = generator.generate_batch(1_500).unwrap();

    let mut schema = BTreeMap::new();
    schema.insert("age".to_string(), FieldSchema::new(FieldType::Numeric).required());
    schema.insert("income".to_string(), FieldSchema::new(FieldType::Numeric));
    schema.insert("region".to_string(), FieldSchema::new(FieldType::Categorical));
    SurveyData::new(to_rows(&records), schema)
}

#[test]
fn test_learned_joint_preserves_structure() {
    let data = survey();
    let observed = pearson(&column(&data.rows, "age"), &column(&data.rows, "income")).unwrap();

    let joint = JointDistributionBuilder::new(SynthesisConfig::default().with_seed(3))
        .from_survey(&data)
        .unwrap();
    assert_eq!(joint.variables(), vec!["age", "income", "region"]);

    let samples = joint.sample(3_000);
    let age = column(&samples, "age");
    let income = column(&samples, "income");
    let r = pearson(&age, &income).unwrap();
    assert!((r - observed).abs() < 0.15, "observed {observed}, resampled {r}");

    let north = samples
        .iter()
        .filter(|s| s["region"].as_str() == Some("north"))
        .count() as f64
        / samples.len() as f64;
    assert!((north - 0.3).abs() < 0.05, "north share {north}");
}

#[test]
fn test_seeded_joint_sampling_repeats() {
    let data = survey();
    let joint = JointDistributionBuilder::new(SynthesisConfig::default().with_seed(3))
        .from_survey(&data)
        .unwrap();
    assert_eq!(joint.sample(10), joint.sample(10));
    assert_eq!(joint.sample_batch(200, Some(1)), joint.sample_batch(200, Some(1)));
}

#[test]
fn test_missing_required_field_is_rejected() {
    let mut data = survey();
    data.rows[0].remove("age");
    assert!(JointDistributionBuilder::default().from_survey(&data).is_err());
}
