use pop_synth::analysis::Record;
use pop_synth::GenerationResult;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded RNG for reproducible test runs
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Sample mean and (n - 1) variance
#[must_use]
pub fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

/// Convert generated records into analyzer rows
#[must_use]
pub fn to_rows(records: &[GenerationResult]) -> Vec<Record> {
    records.iter().map(GenerationResult::to_map).collect()
}

/// Numeric values of one attribute across records
#[must_use]
pub fn column(records: &[Record], name: &str) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.get(name).and_then(|v| v.as_f64()))
        .collect()
}
