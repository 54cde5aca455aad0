//! Tests for correlated and conditional record generation

use pop_synth::analysis::pearson;
use pop_synth::generator::generate;
use pop_synth::{
    AttributeSet, AttributeValue, Categorical, ConditionalRule, CorrelatedGenerator,
    CorrelationEdge, Normal, SynthError, SynthesisConfig, Uniform,
};

use crate::utils::{column, seeded_rng, to_rows};

fn age_income() -> AttributeSet {
    AttributeSet::new()
        .with("age", Uniform::new(22.0, 65.0).unwrap())
        .with("income", Normal::new(50_000.0, 20_000.0).unwrap())
}

#[test]
fn test_correlation_induction() {
    let generator = CorrelatedGenerator::new(age_income())
        .with_correlation(CorrelationEdge::new("age", "income", 0.6).unwrap());
    let mut rng = seeded_rng(42);
    let records: Vec<_> = (0..1_000)
        .map(|_| generator.generate(&mut rng).unwrap())
        .collect();
    let rows = to_rows(&records);
    let r = pearson(&column(&rows, "age"), &column(&rows, "income")).unwrap();
    assert!((0.35..=0.85).contains(&r), "measured correlation {r}");
}

#[test]
fn test_negative_correlation() {
    let edges = [CorrelationEdge::new("age", "income", -0.8).unwrap()];
    let attributes = age_income();
    let mut rng = seeded_rng(7);
    let records: Vec<_> = (0..1_000)
        .map(|_| generate(&attributes, &edges, &[], &mut rng))
        .collect();
    let rows = to_rows(&records);
    let r = pearson(&column(&rows, "age"), &column(&rows, "income")).unwrap();
    assert!(r < -0.5, "measured correlation {r}");
}

#[test]
fn test_conditional_bound() {
    let attributes = age_income().with("experience", Uniform::new(0.0, 40.0).unwrap());
    let rules = [ConditionalRule::numeric("experience", "age", |experience, age| {
        experience.min(age - 22.0)
    })];
    let mut rng = seeded_rng(11);
    for _ in 0..2_000 {
        let record = generate(&attributes, &[], &rules, &mut rng);
        let age = record.get_f64("age").unwrap();
        let experience = record.get_f64("experience").unwrap();
        assert!(experience <= age - 22.0);
        assert!(experience >= 0.0);
    }
}

#[test]
fn test_cycle_terminates() {
    let attributes = AttributeSet::new()
        .with("a", Uniform::new(0.0, 1.0).unwrap())
        .with("b", Uniform::new(10.0, 11.0).unwrap());
    let rules = [
        ConditionalRule::numeric("a", "b", |a, b| a + b),
        ConditionalRule::numeric("b", "a", |b, a| b + a),
    ];
    let mut rng = seeded_rng(3);
    let record = generate(&attributes, &[], &rules, &mut rng);
    // Both fall back to their base distributions
    let a = record.get_f64("a").unwrap();
    let b = record.get_f64("b").unwrap();
    assert!((0.0..=1.0).contains(&a));
    assert!((10.0..=11.0).contains(&b));
}

#[test]
fn test_strict_mode_rejects_cycle() {
    let generator = CorrelatedGenerator::new(age_income())
        .with_config(SynthesisConfig {
            strict_dependencies: true,
            ..SynthesisConfig::default()
        })
        .with_conditional(ConditionalRule::numeric("age", "income", |age, _| age))
        .with_conditional(ConditionalRule::numeric("income", "age", |income, _| income));
    let mut rng = seeded_rng(1);
    match generator.generate(&mut rng) {
        Err(SynthError::CyclicDependency(cycle)) => {
            assert_eq!(cycle, vec!["age".to_string(), "income".to_string()]);
        }
        other => panic!("expected a cyclic dependency error, got {other:?}"),
    }
}

#[test]
fn test_literals_and_unknown_references() {
    let attributes = age_income().with("country", AttributeValue::from("DK"));
    let generator = CorrelatedGenerator::new(attributes)
        .with_correlation(CorrelationEdge::new("age", "height", 0.5).unwrap())
        .with_correlation(CorrelationEdge::new("age", "country", 0.5).unwrap())
        .with_conditional(ConditionalRule::numeric("income", "missing", |_, _| 0.0))
        .with_conditional(ConditionalRule::new("country", "age", |_, _| {
            AttributeValue::from("SE")
        }));
    let record = generator.generate_seeded(5).unwrap();
    assert_eq!(record.get("country"), Some(&AttributeValue::from("DK")));
    assert_ne!(record.get_f64("income"), Some(0.0));
    assert!(record.get("height").is_none());
    assert_eq!(record.len(), 3);
}

#[test]
fn test_rules_chain_through_passes() {
    let attributes = AttributeSet::new()
        .with("bonus", Uniform::new(0.0, 0.0).unwrap())
        .with("salary", Uniform::new(0.0, 0.0).unwrap())
        .with("level", Uniform::new(3.0, 3.0).unwrap());
    let generator = CorrelatedGenerator::new(attributes)
        .with_conditional(ConditionalRule::numeric("bonus", "salary", |_, salary| salary * 0.1))
        .with_conditional(ConditionalRule::numeric("salary", "level", |_, level| level * 10_000.0));
    let record = generator.generate_seeded(1).unwrap();
    assert_eq!(record.get_f64("salary"), Some(30_000.0));
    assert_eq!(record.get_f64("bonus"), Some(3_000.0));
}

#[test]
fn test_attribute_set_from_json() {
    let attributes: AttributeSet = serde_json::from_str(
        r#"{
            "age": {"type": "uniform", "min": 22, "max": 65},
            "children": {"type": "binomial", "trials": 4, "probability": 0.3},
            "region": {"type": "categorical", "outcomes": [["north", 0.4], ["south", 0.6]]},
            "source": "survey-2024"
        }"#,
    )
    .unwrap();
    let record = CorrelatedGenerator::new(attributes).generate_seeded(8).unwrap();
    let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["age", "children", "region", "source"]);
    assert!(matches!(record.get("children"), Some(AttributeValue::Integer(0..=4))));
    assert_eq!(record.get("source"), Some(&AttributeValue::from("survey-2024")));
}

#[test]
fn test_resolution_pass_limit() {
    let attributes = AttributeSet::new()
        .with("bonus", Uniform::new(0.0, 0.0).unwrap())
        .with("salary", Uniform::new(0.0, 0.0).unwrap())
        .with("level", Uniform::new(3.0, 3.0).unwrap());
    let rules = [
        ConditionalRule::numeric("bonus", "salary", |_, salary| salary * 0.1),
        ConditionalRule::numeric("salary", "level", |_, level| level * 10_000.0),
    ];
    let limited = CorrelatedGenerator::new(attributes.clone())
        .with_config(SynthesisConfig {
            max_resolution_passes: 1,
            ..SynthesisConfig::default()
        })
        .with_conditional(rules[0].clone())
        .with_conditional(rules[1].clone());
    let record = limited.generate_seeded(1).unwrap();
    assert_eq!(record.get_f64("salary"), Some(30_000.0));
    assert_eq!(record.get_f64("bonus"), Some(0.0));

    let unlimited = CorrelatedGenerator::new(attributes)
        .with_conditional(rules[0].clone())
        .with_conditional(rules[1].clone());
    assert_eq!(unlimited.generate_seeded(1).unwrap().get_f64("bonus"), Some(3_000.0));
}

#[test]
fn test_text_categories_are_not_blended() {
    let attributes = AttributeSet::new()
        .with(
            "code",
            Categorical::new([
                (AttributeValue::from("12"), 0.6),
                (AttributeValue::from("7"), 0.4),
            ])
            .unwrap(),
        )
        .with("score", Uniform::new(5.0, 5.0).unwrap());
    let generator = CorrelatedGenerator::new(attributes)
        .with_correlation(CorrelationEdge::new("code", "score", 0.9).unwrap());
    let mut rng = seeded_rng(13);
    for _ in 0..50 {
        let record = generator.generate(&mut rng).unwrap();
        assert_eq!(record.get_f64("score"), Some(5.0));
    }
}
