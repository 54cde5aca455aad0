//! Correlated and conditional attribute generation
//!
//! A record is produced in three steps: literal and unconditioned attributes
//! are filled in, conditional attributes are resolved in bounded passes, and
//! linear correlations are blended in afterwards. The dependency graph is
//! checked for cycles once per configuration, not per record.

pub mod attribute;
pub mod conditional;
pub mod correlation;
pub mod dependency;
mod resolver;
pub mod result;

use indicatif::ParallelProgressIterator;
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;

use crate::config::SynthesisConfig;
use crate::error::{Result, SynthError};
use crate::utils::logging::{
    create_optional_progress_bar, finish_progress_bar, log_operation_complete,
    log_operation_start, log_warning,
};
use crate::utils::rng::{rng_from_seed, task_rng};

pub use attribute::{AttributeSet, AttributeSpec};
pub use conditional::{ConditionalRegistry, ConditionalRule};
pub use correlation::{CorrelationEdge, CorrelationKind, CorrelationRegistry};
pub use dependency::DependencyGraph;
pub use result::GenerationResult;

use correlation::blend_correlations;
use resolver::Resolver;

/// Generate one record with the default configuration
///
/// Cyclic rules fall back to base distributions with a warning, as in the
/// non-strict mode of [`CorrelatedGenerator`].
pub fn generate<R: Rng + ?Sized>(
    attributes: &AttributeSet,
    correlations: &[CorrelationEdge],
    conditionals: &[ConditionalRule],
    rng: &mut R,
) -> GenerationResult {
    let correlations = CorrelationRegistry::from_edges(correlations);
    let conditionals = ConditionalRegistry::from_rules(conditionals);
    let max_passes = SynthesisConfig::default().max_resolution_passes;
    generate_record(attributes, &correlations, &conditionals, max_passes, rng)
}

fn generate_record<R: Rng + ?Sized>(
    attributes: &AttributeSet,
    correlations: &CorrelationRegistry,
    conditionals: &ConditionalRegistry,
    max_passes: usize,
    rng: &mut R,
) -> GenerationResult {
    let mut values = Resolver::new(attributes, conditionals, max_passes).resolve(rng);
    blend_correlations(&mut values, attributes, correlations);
    GenerationResult::from_values(attributes, values)
}

/// Attribute generator with correlations and conditional rules
#[derive(Debug, Clone)]
pub struct CorrelatedGenerator {
    attributes: AttributeSet,
    correlations: CorrelationRegistry,
    conditionals: ConditionalRegistry,
    config: SynthesisConfig,
    cycles: Vec<Vec<String>>,
}

impl CorrelatedGenerator {
    /// Create a generator without correlations or rules
    #[must_use]
    pub fn new(attributes: AttributeSet) -> Self {
        Self {
            attributes,
            correlations: CorrelationRegistry::default(),
            conditionals: ConditionalRegistry::default(),
            config: SynthesisConfig::default(),
            cycles: Vec::new(),
        }
    }

    /// Return a generator using `config`
    #[must_use]
    pub fn with_config(self, config: SynthesisConfig) -> Self {
        Self { config, ..self }
    }

    /// Return a generator with an additional correlation
    #[must_use]
    pub fn with_correlation(mut self, edge: CorrelationEdge) -> Self {
        self.add_correlation(edge);
        self
    }

    /// Return a generator with an additional conditional rule
    #[must_use]
    pub fn with_conditional(mut self, rule: ConditionalRule) -> Self {
        self.add_conditional(rule);
        self
    }

    /// Register a correlation between two attributes
    pub fn add_correlation(&mut self, edge: CorrelationEdge) {
        for name in [edge.attribute1(), edge.attribute2()] {
            if !self.attributes.contains(name) {
                log_warning("Correlation references unknown attribute", Some(name));
            }
        }
        self.correlations.add(edge);
    }

    /// Register a conditional rule
    ///
    /// Rules are applied in registration order. Adding a rule re-checks the
    /// dependency graph for cycles.
    pub fn add_conditional(&mut self, rule: ConditionalRule) {
        match self.attributes.get(rule.attribute()) {
            None => log_warning("Rule targets unknown attribute", Some(rule.attribute())),
            Some(spec) if spec.is_literal() => {
                log_warning("Rule targets literal attribute", Some(rule.attribute()));
            }
            Some(_) => {}
        }
        if !self.attributes.contains(rule.depends_on()) {
            log_warning("Rule depends on unknown attribute", Some(rule.depends_on()));
        }
        self.conditionals.add(rule);

        let cycles = DependencyGraph::build(&self.attributes, &self.conditionals).cycles();
        if cycles != self.cycles {
            for cycle in &cycles {
                log_warning("Cyclic conditional dependency", Some(&cycle.join(" -> ")));
            }
        }
        self.cycles = cycles;
    }

    #[must_use]
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    #[must_use]
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Dependency cycles found among the conditional rules
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    fn check_cycles(&self) -> Result<()> {
        match self.cycles.first() {
            Some(cycle) if self.config.strict_dependencies => {
                Err(SynthError::CyclicDependency(cycle.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Generate one record with an injected RNG
    ///
    /// # Errors
    /// `CyclicDependency` when strict dependencies are enabled and the
    /// rules contain a cycle.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GenerationResult> {
        self.check_cycles()?;
        Ok(self.generate_unchecked(rng))
    }

    /// Generate one record from a fresh stream seeded with `seed`
    pub fn generate_seeded(&self, seed: u64) -> Result<GenerationResult> {
        let mut rng = rng_from_seed(Some(seed));
        self.generate(&mut rng)
    }

    fn generate_unchecked<R: Rng + ?Sized>(&self, rng: &mut R) -> GenerationResult {
        generate_record(
            &self.attributes,
            &self.correlations,
            &self.conditionals,
            self.config.max_resolution_passes,
            rng,
        )
    }

    /// Generate `count` records in parallel
    ///
    /// Records are produced in chunks of `batch_chunk_size`; chunk `i` draws
    /// from a stream seeded with `seed + i`, so a seeded batch is identical
    /// regardless of the number of threads. Without a configured seed each
    /// chunk uses OS entropy.
    pub fn generate_batch(&self, count: usize) -> Result<Vec<GenerationResult>> {
        self.check_cycles()?;
        let start = Instant::now();
        let subject = format!("{} attributes", self.attributes.len());
        log_operation_start("Generating records for", &subject);

        let chunk_size = self.config.batch_chunk_size.max(1);
        let chunks: Vec<(usize, usize)> = (0..count)
            .step_by(chunk_size)
            .enumerate()
            .map(|(index, offset)| (index, chunk_size.min(count - offset)))
            .collect();

        let pb = create_optional_progress_bar(
            self.config.show_progress,
            chunks.len() as u64,
            Some("Generating records"),
        );

        let records: Vec<GenerationResult> = chunks
            .par_iter()
            .progress_with(pb.clone())
            .map(|&(index, len)| {
                let mut rng = task_rng(self.config.seed, index);
                (0..len)
                    .map(|_| self.generate_unchecked(&mut rng))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        finish_progress_bar(&pb, Some("Generation complete"));
        log_operation_complete("generated", &subject, records.len(), Some(start.elapsed()));
        Ok(records)
    }
}
