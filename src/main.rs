use log::info;
use pop_synth::{
    AttributeSet, AttributeValue, Categorical, ConditionalRule, CorrelatedGenerator,
    CorrelationEdge, Normal, SynthesisConfig, Uniform,
};
use std::io::Write;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let count: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 10,
    };
    let seed: u64 = match std::env::args().nth(2) {
        Some(arg) => arg.parse()?,
        None => 42,
    };

    let attributes = AttributeSet::new()
        .with("age", Uniform::new(22.0, 65.0)?)
        .with("income", Normal::new(50_000.0, 20_000.0)?)
        .with("experience", Uniform::new(0.0, 40.0)?)
        .with(
            "education",
            Categorical::new([
                (AttributeValue::from("primary"), 0.2),
                (AttributeValue::from("secondary"), 0.5),
                (AttributeValue::from("tertiary"), 0.3),
            ])?,
        )
        .with("country", AttributeValue::from("DK"));

    let config = SynthesisConfig {
        show_progress: count >= 10_000,
        ..SynthesisConfig::default()
    }
    .with_seed(seed);
    info!("{config}");

    let generator = CorrelatedGenerator::new(attributes)
        .with_config(config)
        .with_correlation(CorrelationEdge::new("age", "income", 0.6)?)
        .with_conditional(ConditionalRule::numeric("experience", "age", |experience, age| {
            experience.min(age - 22.0).max(0.0)
        }));

    let start = Instant::now();
    let records = generator.generate_batch(count)?;
    info!("Generated {} records in {:?}", records.len(), start.elapsed());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    Ok(())
}
