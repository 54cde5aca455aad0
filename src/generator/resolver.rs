//! Bounded multi-pass resolution of conditional attributes

use log::debug;
use rand::Rng;
use rustc_hash::FxHashMap;

use super::attribute::{AttributeSet, AttributeSpec};
use super::conditional::{ConditionalRegistry, ConditionalRule};
use crate::distribution::Sampleable;
use crate::utils::logging::log_warning;
use crate::value::AttributeValue;

/// Resolves one record's attribute values before correlation blending
pub(crate) struct Resolver<'a> {
    attributes: &'a AttributeSet,
    conditionals: &'a ConditionalRegistry,
    max_passes: usize,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        attributes: &'a AttributeSet,
        conditionals: &'a ConditionalRegistry,
        max_passes: usize,
    ) -> Self {
        Self {
            attributes,
            conditionals,
            max_passes,
        }
    }

    /// Rules for `name` whose dependency is a known attribute
    fn rules_for(&self, name: &str) -> impl Iterator<Item = &'a ConditionalRule> {
        self.conditionals
            .rules_for(name)
            .iter()
            .filter(|rule| self.attributes.contains(rule.depends_on()))
    }

    /// Produce a value for every attribute in the set
    ///
    /// Literals are copied, unconditioned attributes are sampled directly,
    /// and the rest are resolved in passes once any of their dependencies
    /// is available. Attributes still pending when a pass makes no progress
    /// (or the pass limit is reached) fall back to their base distribution.
    pub(crate) fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> FxHashMap<String, AttributeValue> {
        let mut values: FxHashMap<String, AttributeValue> =
            FxHashMap::with_capacity_and_hasher(self.attributes.len(), Default::default());
        let mut pending: Vec<&str> = Vec::new();

        for (name, spec) in self.attributes.iter() {
            match spec {
                AttributeSpec::Literal(value) => {
                    values.insert(name.to_string(), value.clone());
                }
                AttributeSpec::Sampled(distribution) => {
                    if self.rules_for(name).next().is_none() {
                        values.insert(name.to_string(), distribution.sample(rng));
                    } else {
                        pending.push(name);
                    }
                }
            }
        }

        for pass in 1..=self.max_passes {
            if pending.is_empty() {
                break;
            }
            let before = pending.len();
            pending.retain(|name| !self.try_resolve(name, &mut values, rng));
            let resolved = before - pending.len();
            debug!(
                "Resolution pass {pass}: resolved {resolved} attributes, {} pending",
                pending.len()
            );
            if resolved == 0 {
                break;
            }
        }

        if !pending.is_empty() {
            log_warning(
                "Stalled resolution, sampling base distributions",
                Some(&pending.join(", ")),
            );
            for name in pending {
                if let Some(distribution) =
                    self.attributes.get(name).and_then(AttributeSpec::distribution)
                {
                    values.insert(name.to_string(), distribution.sample(rng));
                }
            }
        }

        values
    }

    /// Resolve `name` if any of its dependencies has a value
    fn try_resolve<R: Rng + ?Sized>(
        &self,
        name: &str,
        values: &mut FxHashMap<String, AttributeValue>,
        rng: &mut R,
    ) -> bool {
        let ready = self.rules_for(name).any(|rule| values.contains_key(rule.depends_on()));
        if !ready {
            return false;
        }
        let Some(distribution) = self.attributes.get(name).and_then(AttributeSpec::distribution) else {
            return false;
        };

        let base = distribution.sample(rng);
        let value = self.rules_for(name).fold(base, |current, rule| {
            match values.get(rule.depends_on()) {
                Some(dependency) => rule.apply(&current, dependency),
                None => current,
            }
        });
        values.insert(name.to_string(), value);
        true
    }
}
