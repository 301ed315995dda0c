//! Adjacency-list graph consumed by the BFS tracer.
//!
//! Neighbor order is the order edges were added. BFS visitation order follows
//! it directly, so preserving insertion order is what makes traces
//! reproducible for a given graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A vertex with a stable id and a display label (e.g. `"A"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
}

/// Undirected graph in adjacency-list form. The node list and adjacency map
/// are never mutated during replay; reducers only annotate on top of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId, label: impl Into<String>) {
        self.adjacency.entry(id.clone()).or_default();
        self.nodes.push(GraphNode {
            id,
            label: label.into(),
        });
    }

    /// Appends the edge to both endpoints' neighbor lists. Callers are
    /// expected to avoid self-loops and duplicates.
    pub fn add_undirected_edge(&mut self, a: &NodeId, b: &NodeId) {
        self.adjacency.entry(a.clone()).or_default().push(b.clone());
        self.adjacency.entry(b.clone()).or_default().push(a.clone());
    }

    pub fn has_edge(&self, from: &NodeId, to: &NodeId) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbors| neighbors.contains(to))
    }

    /// Neighbors of `id` in insertion order; empty for unknown ids.
    pub fn neighbors(&self, id: &NodeId) -> &[NodeId] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Display label for `id`, falling back to the raw id for unknown nodes.
    pub fn label_of<'a>(&'a self, id: &'a NodeId) -> &'a str {
        self.node(id).map_or(id.as_str(), |n| n.label.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Graph {
        // A - B - C
        let mut graph = Graph::new();
        graph.add_node(NodeId::from("n0"), "A");
        graph.add_node(NodeId::from("n1"), "B");
        graph.add_node(NodeId::from("n2"), "C");
        graph.add_undirected_edge(&NodeId::from("n0"), &NodeId::from("n1"));
        graph.add_undirected_edge(&NodeId::from("n1"), &NodeId::from("n2"));
        graph
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = line();
        assert!(graph.has_edge(&NodeId::from("n0"), &NodeId::from("n1")));
        assert!(graph.has_edge(&NodeId::from("n1"), &NodeId::from("n0")));
        assert!(!graph.has_edge(&NodeId::from("n0"), &NodeId::from("n2")));
    }

    #[test]
    fn neighbor_order_is_insertion_order() {
        let graph = line();
        assert_eq!(
            graph.neighbors(&NodeId::from("n1")),
            &[NodeId::from("n0"), NodeId::from("n2")]
        );
        assert!(graph.neighbors(&NodeId::from("n9")).is_empty());
    }

    #[test]
    fn label_of_falls_back_to_id() {
        let graph = line();
        assert_eq!(graph.label_of(&NodeId::from("n0")), "A");
        assert_eq!(graph.label_of(&NodeId::from("zz")), "zz");
    }
}
