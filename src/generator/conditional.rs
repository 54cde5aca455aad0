//! Conditional transforms between attributes

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::value::AttributeValue;

/// Pure function `(base_value, dependency_value) -> value`
pub type TransformFn = Arc<dyn Fn(&AttributeValue, &AttributeValue) -> AttributeValue + Send + Sync>;

/// Adjusts one attribute's sampled value using another attribute's value
#[derive(Clone)]
pub struct ConditionalRule {
    attribute: String,
    depends_on: String,
    transform: TransformFn,
}

impl ConditionalRule {
    /// Create a rule from an arbitrary value transform
    pub fn new<F>(attribute: impl Into<String>, depends_on: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&AttributeValue, &AttributeValue) -> AttributeValue + Send + Sync + 'static,
    {
        Self {
            attribute: attribute.into(),
            depends_on: depends_on.into(),
            transform: Arc::new(transform),
        }
    }

    /// Create a rule over numeric values
    ///
    /// When either value is not numeric the base value passes through
    /// unchanged. Integer base values stay integers (rounded).
    pub fn numeric<F>(attribute: impl Into<String>, depends_on: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(attribute, depends_on, move |base, dependency| {
            match (base.as_f64(), dependency.as_f64()) {
                (Some(b), Some(d)) if base.is_numeric() => {
                    let result = f(b, d);
                    match base {
                        AttributeValue::Integer(_) => AttributeValue::Integer(result.round() as i64),
                        _ => AttributeValue::Number(result),
                    }
                }
                _ => base.clone(),
            }
        })
    }

    /// Attribute this rule adjusts
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Attribute this rule reads
    #[must_use]
    pub fn depends_on(&self) -> &str {
        &self.depends_on
    }

    /// Apply the transform
    #[must_use]
    pub fn apply(&self, base: &AttributeValue, dependency: &AttributeValue) -> AttributeValue {
        (self.transform)(base, dependency)
    }
}

impl fmt::Debug for ConditionalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalRule")
            .field("attribute", &self.attribute)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// Rules grouped by the attribute they adjust, in registration order
#[derive(Debug, Clone, Default)]
pub struct ConditionalRegistry {
    rules: FxHashMap<String, SmallVec<[ConditionalRule; 2]>>,
}

impl ConditionalRegistry {
    /// Build from a list of rules, keeping their order
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a ConditionalRule>) -> Self {
        let mut registry = Self::default();
        for rule in rules {
            registry.add(rule.clone());
        }
        registry
    }

    /// Register a rule after any existing rules for the same attribute
    pub fn add(&mut self, rule: ConditionalRule) {
        self.rules
            .entry(rule.attribute.clone())
            .or_default()
            .push(rule);
    }

    /// Rules adjusting `attribute`
    #[must_use]
    pub fn rules_for(&self, attribute: &str) -> &[ConditionalRule] {
        self.rules.get(attribute).map_or(&[], |r| r.as_slice())
    }

    /// All rules, grouped by attribute
    pub fn iter(&self) -> impl Iterator<Item = &ConditionalRule> {
        self.rules.values().flat_map(|r| r.iter())
    }

    /// Whether the registry has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
