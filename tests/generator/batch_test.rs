//! Tests for parallel batch generation

use pop_synth::{
    AttributeSet, AttributeValue, Categorical, CorrelatedGenerator, CorrelationEdge, Normal,
    SynthesisConfig, Uniform,
};

fn generator(seed: u64, chunk_size: usize) -> CorrelatedGenerator {
    let attributes = AttributeSet::new()
        .with("age", Uniform::new(22.0, 65.0).unwrap())
        .with("income", Normal::new(50_000.0, 20_000.0).unwrap())
        .with(
            "group",
            Categorical::new([(AttributeValue::from("a"), 0.5), (AttributeValue::from("b"), 0.5)])
                .unwrap(),
        );
    CorrelatedGenerator::new(attributes)
        .with_config(SynthesisConfig {
            seed: Some(seed),
            batch_chunk_size: chunk_size,
            ..SynthesisConfig::default()
        })
        .with_correlation(CorrelationEdge::new("age", "income", 0.5).unwrap())
}

#[test]
fn test_seeded_batch_is_deterministic() {
    let generator = generator(99, 16);
    let first = generator.generate_batch(250).unwrap();
    let second = generator.generate_batch(250).unwrap();
    assert_eq!(first.len(), 250);
    assert_eq!(first, second);
}

#[test]
fn test_batch_ignores_thread_count() {
    let generator = generator(7, 10);
    let parallel = generator.generate_batch(120).unwrap();
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| generator.generate_batch(120).unwrap());
    assert_eq!(parallel, single);
}

#[test]
fn test_different_seeds_differ() {
    let first = generator(1, 32).generate_batch(40).unwrap();
    let second = generator(2, 32).generate_batch(40).unwrap();
    assert_ne!(first, second);
}
