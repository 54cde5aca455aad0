//! Dependency graph over conditional rules
//!
//! Built once per generator configuration to report dependency cycles
//! before any record is generated.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use super::attribute::AttributeSet;
use super::conditional::ConditionalRegistry;

/// Directed graph with an edge `dependency -> attribute` per rule
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    nodes: FxHashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph for the rules that reference known attributes
    #[must_use]
    pub fn build(attributes: &AttributeSet, conditionals: &ConditionalRegistry) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = FxHashMap::default();
        for name in attributes.names() {
            nodes.insert(name.to_string(), graph.add_node(name.to_string()));
        }
        for rule in conditionals.iter() {
            if let (Some(&from), Some(&to)) =
                (nodes.get(rule.depends_on()), nodes.get(rule.attribute()))
            {
                graph.update_edge(from, to, ());
            }
        }
        Self { graph, nodes }
    }

    /// Groups of attributes that depend on each other
    ///
    /// Each cycle is a strongly connected component with more than one
    /// attribute, or a single attribute depending on itself. Names inside a
    /// cycle are sorted for stable reporting.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self.graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut names: Vec<String> =
                    component.iter().map(|&idx| self.graph[idx].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Attributes `name` directly depends on
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.nodes.get(name).map_or_else(Vec::new, |&idx| {
            self.graph
                .neighbors_directed(idx, petgraph::Direction::Incoming)
                .map(|dep| self.graph[dep].as_str())
                .collect()
        })
    }
}
