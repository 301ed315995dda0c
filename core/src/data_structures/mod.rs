//! Structure types manipulated by tracers and reconstructed by reducers.
//!
//! Trees are arena-backed: nodes are records addressed by stable [`NodeId`]s
//! in an id-indexed map rather than owning boxed children. This keeps replay
//! cloning cheap (copy the map) and makes parent lookups and splices plain
//! map edits instead of pointer surgery.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod graph;
pub mod tree;

pub use graph::{Graph, GraphNode};
pub use tree::{Tree, TreeNode};

/// Stable node identity, independent of the node's value and never reused.
///
/// Ids follow the `n<value>` convention for generated nodes (e.g. `n42`),
/// but the engine treats them as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Conventional id for a node created to hold `value`.
    pub fn for_value(value: i64) -> Self {
        Self(format!("n{value}"))
    }

    /// Sentinel used where an operation has no meaningful parent, e.g.
    /// detaching the root of a tree. Always empty.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which child slot of a parent node an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_for_value_uses_convention() {
        assert_eq!(NodeId::for_value(42).as_str(), "n42");
    }

    #[test]
    fn empty_id_is_the_root_sentinel() {
        assert!(NodeId::empty().is_empty());
        assert!(!NodeId::from("n1").is_empty());
    }

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
    }
}
