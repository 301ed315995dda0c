//! Structure reducers: pure folds of operation lists into visual states.
//!
//! A reducer never mutates the caller-supplied initial state; it produces a
//! fresh state value. Reducers have no terminal states and are called
//! repeatedly over growing prefixes of the same trace, so folding must be
//! idempotent from any initial state. Malformed operations referencing
//! unknown ids are replay anomalies: logged and skipped, never fatal, so one
//! bad operation cannot crash an in-progress visualization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Structure;
use crate::data_structures::{Graph, NodeId, Tree};
use crate::operation::Operation;
use crate::trace::AlgorithmInput;

mod array;
mod graph;
mod tree;

pub use array::ArrayReducer;
pub use graph::GraphReducer;
pub use tree::TreeReducer;

/// Emphasized indices in an array visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Focus {
    pub i1: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i2: Option<usize>,
}

impl Focus {
    pub fn pair(i1: usize, i2: usize) -> Self {
        Self { i1, i2: Some(i2) }
    }
}

/// Visual state of an array structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayState {
    pub values: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Focus>,
}

impl ArrayState {
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            focus: None,
        }
    }
}

/// Visual state of a binary search tree structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeState {
    pub tree: Tree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_ids: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_node_id: Option<NodeId>,
}

impl TreeState {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }
}

/// An explored (directed) edge annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploredEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Visual state of a graph traversal. The graph itself is structurally
/// immutable during replay and shared between states; only the annotation
/// lists and focus change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphState {
    pub graph: Arc<Graph>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visited_ids: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queue_ids: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explored_edges: Vec<ExploredEdge>,
}

impl GraphState {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self {
            graph,
            visited_ids: Vec::new(),
            queue_ids: Vec::new(),
            focus_id: None,
            explored_edges: Vec::new(),
        }
    }
}

/// Structure-specific visual state, one variant per structure kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "structure", rename_all = "lowercase")]
pub enum VisualState {
    Array(ArrayState),
    Bst(TreeState),
    Graph(GraphState),
}

impl VisualState {
    pub fn structure(&self) -> Structure {
        match self {
            VisualState::Array(_) => Structure::Array,
            VisualState::Bst(_) => Structure::Bst,
            VisualState::Graph(_) => Structure::Graph,
        }
    }

    /// The starting visual state for a given algorithm input: the untouched
    /// structure with no focus or annotations.
    pub fn initial_for(input: &AlgorithmInput) -> VisualState {
        match input {
            AlgorithmInput::Array { values } => {
                VisualState::Array(ArrayState::new(values.clone()))
            }
            AlgorithmInput::Bst { tree, .. } => VisualState::Bst(TreeState::new(tree.clone())),
            AlgorithmInput::Graph { graph, .. } => {
                VisualState::Graph(GraphState::new(Arc::new(graph.clone())))
            }
        }
    }

    pub fn as_array(&self) -> Option<&ArrayState> {
        match self {
            VisualState::Array(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeState> {
        match self {
            VisualState::Bst(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphState> {
        match self {
            VisualState::Graph(state) => Some(state),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("{expected} reducer received {actual} state")]
    StateMismatch {
        expected: Structure,
        actual: Structure,
    },

    #[error("invalid {kind} operation: {detail}")]
    InvalidOperation { kind: &'static str, detail: String },
}

/// Visual reducer: folds domain operations over an initial state to produce
/// the state at a specific point in the trace. Pure; does not touch the UI.
pub trait VisualReducer: Send + Sync {
    /// Structure kind this reducer interprets.
    fn structure(&self) -> Structure;

    /// Reduces `operations` over `initial` into a fresh state.
    fn compute(
        &self,
        initial: &VisualState,
        operations: &[Operation],
    ) -> Result<VisualState, ReduceError>;

    /// Development-time validation hook: checks that operations carry the
    /// fields this reducer needs (non-empty ids). Advisory; `compute` does
    /// not depend on it.
    fn validate(&self, operations: &[Operation]) -> Result<(), ReduceError> {
        let _ = operations;
        Ok(())
    }
}

pub(crate) fn expect_array_state(
    initial: &VisualState,
) -> Result<&ArrayState, ReduceError> {
    initial.as_array().ok_or(ReduceError::StateMismatch {
        expected: Structure::Array,
        actual: initial.structure(),
    })
}

pub(crate) fn expect_tree_state(initial: &VisualState) -> Result<&TreeState, ReduceError> {
    initial.as_tree().ok_or(ReduceError::StateMismatch {
        expected: Structure::Bst,
        actual: initial.structure(),
    })
}

pub(crate) fn expect_graph_state(initial: &VisualState) -> Result<&GraphState, ReduceError> {
    initial.as_graph().ok_or(ReduceError::StateMismatch {
        expected: Structure::Graph,
        actual: initial.structure(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_matches_input_structure() {
        let input = AlgorithmInput::Array {
            values: vec![5, 3, 1],
        };
        let state = VisualState::initial_for(&input);
        assert_eq!(state.structure(), Structure::Array);
        assert_eq!(state.as_array().unwrap().values, vec![5, 3, 1]);
        assert!(state.as_tree().is_none());
    }

    #[test]
    fn state_mismatch_is_reported() {
        let state = VisualState::Array(ArrayState::new(vec![1]));
        let err = expect_tree_state(&state).unwrap_err();
        assert!(matches!(
            err,
            ReduceError::StateMismatch {
                expected: Structure::Bst,
                actual: Structure::Array,
            }
        ));
    }
}
