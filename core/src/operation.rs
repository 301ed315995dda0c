//! The closed vocabulary of replayable visual operations.
//!
//! An operation is an atomic domain event a tracer emits and a reducer folds:
//! pure data, order-significant, and replayable in isolation given only the
//! current visual state. The enum is deliberately closed so every reducer
//! match is exhaustive; adding a kind forces each reducer to acknowledge it.
//!
//! Wire tags follow the `domain/action` convention of the serialized trace
//! format (`"array/swap"`, `"bst/attach-node"`, `"graph/visit"`).

use serde::{Deserialize, Serialize};

use crate::catalog::Structure;
use crate::data_structures::{NodeId, Side};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all_fields = "camelCase")]
pub enum Operation {
    // Array operations
    #[serde(rename = "array/compare")]
    ArrayCompare { i: usize, j: usize },
    #[serde(rename = "array/swap")]
    ArraySwap { i: usize, j: usize },

    // BST traversal operations
    #[serde(rename = "bst/visit")]
    BstVisit { node_id: NodeId },
    #[serde(rename = "bst/compare")]
    BstCompare { node_id: NodeId, key: i64 },
    #[serde(rename = "bst/move-left")]
    BstMoveLeft { from_id: NodeId, to_id: NodeId },
    #[serde(rename = "bst/move-right")]
    BstMoveRight { from_id: NodeId, to_id: NodeId },

    // BST mutation operations
    #[serde(rename = "bst/create-node")]
    BstCreateNode { node_id: NodeId, value: i64 },
    #[serde(rename = "bst/attach-node")]
    BstAttachNode {
        parent_id: NodeId,
        new_node_id: NodeId,
        side: Side,
    },
    #[serde(rename = "bst/detach-node")]
    BstDetachNode {
        /// Empty when the detached node is the root (the tree becomes empty).
        parent_id: NodeId,
        node_id: NodeId,
        side: Side,
    },
    #[serde(rename = "bst/replace-node")]
    BstReplaceNode {
        old_node_id: NodeId,
        new_node_id: NodeId,
    },
    #[serde(rename = "bst/mark-delete")]
    BstMarkDelete { node_id: NodeId },

    // Graph traversal operations
    #[serde(rename = "graph/visit")]
    GraphVisit { node_id: NodeId },
    #[serde(rename = "graph/enqueue")]
    GraphEnqueue { node_id: NodeId },
    #[serde(rename = "graph/dequeue")]
    GraphDequeue { node_id: NodeId },
    #[serde(rename = "graph/explore-edge")]
    GraphExploreEdge { from_id: NodeId, to_id: NodeId },
    #[serde(rename = "graph/mark-visited")]
    GraphMarkVisited { node_id: NodeId },
}

impl Operation {
    /// The wire tag of this operation (`"array/swap"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::ArrayCompare { .. } => "array/compare",
            Operation::ArraySwap { .. } => "array/swap",
            Operation::BstVisit { .. } => "bst/visit",
            Operation::BstCompare { .. } => "bst/compare",
            Operation::BstMoveLeft { .. } => "bst/move-left",
            Operation::BstMoveRight { .. } => "bst/move-right",
            Operation::BstCreateNode { .. } => "bst/create-node",
            Operation::BstAttachNode { .. } => "bst/attach-node",
            Operation::BstDetachNode { .. } => "bst/detach-node",
            Operation::BstReplaceNode { .. } => "bst/replace-node",
            Operation::BstMarkDelete { .. } => "bst/mark-delete",
            Operation::GraphVisit { .. } => "graph/visit",
            Operation::GraphEnqueue { .. } => "graph/enqueue",
            Operation::GraphDequeue { .. } => "graph/dequeue",
            Operation::GraphExploreEdge { .. } => "graph/explore-edge",
            Operation::GraphMarkVisited { .. } => "graph/mark-visited",
        }
    }

    /// Which structure's reducer interprets this operation.
    pub fn structure(&self) -> Structure {
        match self {
            Operation::ArrayCompare { .. } | Operation::ArraySwap { .. } => Structure::Array,
            Operation::BstVisit { .. }
            | Operation::BstCompare { .. }
            | Operation::BstMoveLeft { .. }
            | Operation::BstMoveRight { .. }
            | Operation::BstCreateNode { .. }
            | Operation::BstAttachNode { .. }
            | Operation::BstDetachNode { .. }
            | Operation::BstReplaceNode { .. }
            | Operation::BstMarkDelete { .. } => Structure::Bst,
            Operation::GraphVisit { .. }
            | Operation::GraphEnqueue { .. }
            | Operation::GraphDequeue { .. }
            | Operation::GraphExploreEdge { .. }
            | Operation::GraphMarkVisited { .. } => Structure::Graph,
        }
    }

    /// True for operations that rewrite tree structure (as opposed to
    /// traversal annotations). The tree reducer uses this to decide whether
    /// a replay batch needs its own copy of the node arena.
    pub fn is_tree_mutation(&self) -> bool {
        matches!(
            self,
            Operation::BstCreateNode { .. }
                | Operation::BstAttachNode { .. }
                | Operation::BstDetachNode { .. }
                | Operation::BstReplaceNode { .. }
        )
    }
}
