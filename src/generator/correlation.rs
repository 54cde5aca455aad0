//! Pairwise correlation edges and post-hoc linear blending

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::attribute::AttributeSet;
use crate::distribution::Sampleable;
use crate::error::Result;
use crate::error::util::{ensure_in_range, invalid};
use crate::value::AttributeValue;

/// Kind of relationship an edge declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationKind {
    /// Linear (Pearson-style) association
    #[default]
    Linear,
}

/// A declared correlation between two attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEdge {
    attribute1: String,
    attribute2: String,
    coefficient: f64,
    #[serde(default)]
    kind: CorrelationKind,
}

impl CorrelationEdge {
    /// Create a linear correlation; the coefficient must lie in `[-1, 1]`
    pub fn new(
        attribute1: impl Into<String>,
        attribute2: impl Into<String>,
        coefficient: f64,
    ) -> Result<Self> {
        let attribute1 = attribute1.into();
        let attribute2 = attribute2.into();
        if attribute1 == attribute2 {
            return invalid(format!("attribute '{attribute1}' cannot correlate with itself"));
        }
        Ok(Self {
            attribute1,
            attribute2,
            coefficient: ensure_in_range("coefficient", coefficient, -1.0, 1.0)?,
            kind: CorrelationKind::Linear,
        })
    }

    /// First endpoint
    #[must_use]
    pub fn attribute1(&self) -> &str {
        &self.attribute1
    }

    /// Second endpoint
    #[must_use]
    pub fn attribute2(&self) -> &str {
        &self.attribute2
    }

    /// Correlation coefficient
    #[must_use]
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Relationship kind
    #[must_use]
    pub fn kind(&self) -> CorrelationKind {
        self.kind
    }

    /// The endpoint opposite to `name`
    #[must_use]
    pub fn other(&self, name: &str) -> &str {
        if self.attribute1 == name {
            &self.attribute2
        } else {
            &self.attribute1
        }
    }
}

/// Edges indexed under both endpoints
#[derive(Debug, Clone, Default)]
pub struct CorrelationRegistry {
    edges: FxHashMap<String, Vec<CorrelationEdge>>,
}

impl CorrelationRegistry {
    /// Build from a list of edges
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a CorrelationEdge>) -> Self {
        let mut registry = Self::default();
        for edge in edges {
            registry.add(edge.clone());
        }
        registry
    }

    /// Register an edge under both endpoints
    pub fn add(&mut self, edge: CorrelationEdge) {
        self.edges
            .entry(edge.attribute2.clone())
            .or_default()
            .push(edge.clone());
        self.edges
            .entry(edge.attribute1.clone())
            .or_default()
            .push(edge);
    }

    /// Edges touching `name`
    #[must_use]
    pub fn edges_for(&self, name: &str) -> &[CorrelationEdge] {
        self.edges.get(name).map_or(&[], Vec::as_slice)
    }

    /// Every distinct edge once
    pub fn unique_edges(&self) -> impl Iterator<Item = &CorrelationEdge> {
        self.edges
            .iter()
            .flat_map(|(name, edges)| edges.iter().filter(move |e| e.attribute1 == *name))
    }

    /// Whether no edge is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

fn std_dev_or_unit(variance: Option<f64>) -> f64 {
    match variance {
        Some(v) if v > 0.0 && v.is_finite() => v.sqrt(),
        _ => 1.0,
    }
}

/// Pull correlated attributes towards each other
///
/// For every source attribute (in set order) with edges, the source z-score
/// under its analytic mean and variance is projected onto each partner as
/// `coefficient * z`, converted back with the partner's analytic moments,
/// and blended in with weight `|coefficient|`. A source is marked processed
/// afterwards, and edges to processed partners are skipped, so every edge
/// blends exactly once.
pub(crate) fn blend_correlations(
    values: &mut FxHashMap<String, AttributeValue>,
    attributes: &AttributeSet,
    registry: &CorrelationRegistry,
) {
    if registry.is_empty() {
        return;
    }
    let mut processed: FxHashSet<&str> = FxHashSet::default();

    for (name, spec) in attributes.iter() {
        let edges = registry.edges_for(name);
        if edges.is_empty() || processed.contains(name) {
            continue;
        }
        let Some(source) = spec.distribution() else {
            continue;
        };
        let (Some(value), Some(mean)) = (numeric(values.get(name)), source.numeric_mean()) else {
            continue;
        };
        let z = (value - mean) / std_dev_or_unit(source.variance());

        for edge in edges {
            let partner = edge.other(name);
            if processed.contains(partner) {
                continue;
            }
            let Some(target_dist) = attributes.get(partner).and_then(|s| s.distribution()) else {
                continue;
            };
            let Some(current) = values.get(partner) else {
                continue;
            };
            let (Some(original), Some(partner_mean)) =
                (numeric(Some(current)), target_dist.numeric_mean())
            else {
                continue;
            };

            let target = partner_mean
                + edge.coefficient * z * std_dev_or_unit(target_dist.variance());
            let weight = edge.coefficient.abs();
            let blended = original * (1.0 - weight) + target * weight;

            let updated = match current {
                AttributeValue::Integer(_) => AttributeValue::Integer(blended.round() as i64),
                _ => AttributeValue::Number(blended),
            };
            values.insert(partner.to_string(), updated);
        }
        processed.insert(name);
    }
}

fn numeric(value: Option<&AttributeValue>) -> Option<f64> {
    value.filter(|v| v.is_numeric()).and_then(AttributeValue::as_f64)
}
