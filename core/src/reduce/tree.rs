//! Tree reducer: traversal annotations plus full BST mutation semantics.
//!
//! The node arena is copy-on-write, so a traversal-only batch shares the
//! initial state's arena and the first structural edit of a batch pays for
//! one id-indexed map copy. Distinct `compute` calls over growing prefixes of
//! a trace therefore never alias mutable tree storage.
//!
//! `bst/replace-node` performs the full BST-delete relinking here, not in the
//! tracer: successor splice with the root case and the
//! successor-is-immediate-right-child case.

use std::collections::BTreeMap;

use log::warn;

use crate::catalog::Structure;
use crate::data_structures::{NodeId, Side, TreeNode};
use crate::operation::Operation;
use crate::reduce::{expect_tree_state, ReduceError, TreeState, VisualReducer, VisualState};

#[derive(Debug, Default)]
pub struct TreeReducer;

impl VisualReducer for TreeReducer {
    fn structure(&self) -> Structure {
        Structure::Bst
    }

    fn compute(
        &self,
        initial: &VisualState,
        operations: &[Operation],
    ) -> Result<VisualState, ReduceError> {
        let mut state = expect_tree_state(initial)?.clone();

        // Created-but-not-yet-attached nodes live here until bst/attach-node
        // links them into the tree.
        let mut pending: BTreeMap<NodeId, TreeNode> = BTreeMap::new();

        for op in operations {
            match op {
                Operation::BstVisit { node_id } => {
                    state.focus_id = Some(node_id.clone());
                    // Avoid duplicate consecutive path entries from
                    // move+visit pairs.
                    if state.path_ids.last() != Some(node_id) {
                        state.path_ids.push(node_id.clone());
                    }
                }

                Operation::BstCompare { key, .. } => {
                    state.compare_key = Some(*key);
                }

                // Movement is informational; the following visit updates
                // focus and path.
                Operation::BstMoveLeft { .. } | Operation::BstMoveRight { .. } => {}

                Operation::BstCreateNode { node_id, value } => {
                    pending.insert(node_id.clone(), TreeNode::leaf(*value));
                    state.focus_id = Some(node_id.clone());
                }

                Operation::BstAttachNode {
                    parent_id,
                    new_node_id,
                    side,
                } => {
                    attach_node(&mut state, &mut pending, parent_id, new_node_id, *side);
                }

                Operation::BstDetachNode {
                    parent_id,
                    node_id,
                    side,
                } => {
                    detach_node(&mut state, parent_id, node_id, *side);
                }

                Operation::BstMarkDelete { node_id } => {
                    state.delete_node_id = Some(node_id.clone());
                }

                Operation::BstReplaceNode {
                    old_node_id,
                    new_node_id,
                } => {
                    replace_node(&mut state, old_node_id, new_node_id);
                }

                Operation::ArrayCompare { .. }
                | Operation::ArraySwap { .. }
                | Operation::GraphVisit { .. }
                | Operation::GraphEnqueue { .. }
                | Operation::GraphDequeue { .. }
                | Operation::GraphExploreEdge { .. }
                | Operation::GraphMarkVisited { .. } => {}
            }
        }

        Ok(VisualState::Bst(state))
    }

    fn validate(&self, operations: &[Operation]) -> Result<(), ReduceError> {
        for op in operations {
            let invalid = |detail: String| ReduceError::InvalidOperation {
                kind: op.kind(),
                detail,
            };
            match op {
                Operation::BstVisit { node_id }
                | Operation::BstMarkDelete { node_id }
                | Operation::BstCompare { node_id, .. } => {
                    if node_id.is_empty() {
                        return Err(invalid("missing nodeId".into()));
                    }
                }
                Operation::BstMoveLeft { from_id, to_id }
                | Operation::BstMoveRight { from_id, to_id } => {
                    if from_id.is_empty() || to_id.is_empty() {
                        return Err(invalid("missing fromId/toId".into()));
                    }
                }
                Operation::BstCreateNode { node_id, .. } => {
                    if node_id.is_empty() {
                        return Err(invalid("missing nodeId".into()));
                    }
                }
                // An empty parent id is legal for attach and detach: it marks
                // the root slot of the tree.
                Operation::BstAttachNode { new_node_id, .. } => {
                    if new_node_id.is_empty() {
                        return Err(invalid("missing newNodeId".into()));
                    }
                }
                Operation::BstDetachNode { node_id, .. } => {
                    if node_id.is_empty() {
                        return Err(invalid("missing nodeId".into()));
                    }
                }
                Operation::BstReplaceNode {
                    old_node_id,
                    new_node_id,
                } => {
                    if old_node_id.is_empty() || new_node_id.is_empty() {
                        return Err(invalid("missing oldNodeId/newNodeId".into()));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn attach_node(
    state: &mut TreeState,
    pending: &mut BTreeMap<NodeId, TreeNode>,
    parent_id: &NodeId,
    new_node_id: &NodeId,
    side: Side,
) {
    let Some(node) = pending.remove(new_node_id) else {
        warn!("bst/attach-node: node {new_node_id} not found in pending nodes");
        return;
    };

    if state.tree.is_empty() {
        // Attaching to an empty tree: the pending node becomes the root.
        state.tree.insert_node(new_node_id.clone(), node);
        state.tree.set_root(Some(new_node_id.clone()));
    } else if state.tree.contains(parent_id) {
        state.tree.insert_node(new_node_id.clone(), node);
        state.tree.set_child(parent_id, side, Some(new_node_id.clone()));
        state.focus_id = Some(new_node_id.clone());
        state.path_ids.push(new_node_id.clone());
    } else {
        // Non-fatal anomaly; the pending node is dropped.
        warn!("bst/attach-node: parent {parent_id} not found in tree");
    }
}

fn detach_node(state: &mut TreeState, parent_id: &NodeId, node_id: &NodeId, side: Side) {
    let Some(root) = state.tree.root().cloned() else {
        warn!("bst/detach-node: tree is empty");
        return;
    };

    if &root == node_id {
        // Detaching the root: the tree becomes empty.
        state.tree.set_root(None);
        state.tree.remove_node(node_id);
        return;
    }

    if state.tree.contains(parent_id) {
        state.tree.set_child(parent_id, side, None);
        state.tree.remove_node(node_id);
        // Focus moves to the parent after detachment.
        state.focus_id = Some(parent_id.clone());
    } else {
        warn!("bst/detach-node: parent {parent_id} not found in tree");
    }
}

/// The structural relinking implied by `bst/replace-node`: `new` takes over
/// `old`'s position following standard BST-successor-splice semantics.
fn replace_node(state: &mut TreeState, old_id: &NodeId, new_id: &NodeId) {
    let Some(root) = state.tree.root().cloned() else {
        warn!("bst/replace-node: tree is empty");
        return;
    };
    if !state.tree.contains(old_id) {
        warn!("bst/replace-node: old node {old_id} not found");
        return;
    }
    if !state.tree.contains(new_id) {
        warn!("bst/replace-node: new node {new_id} not found");
        return;
    }

    // Snapshots before any relinking.
    let old_left = state.tree.node(old_id).and_then(|n| n.left.clone());
    let old_right = state.tree.node(old_id).and_then(|n| n.right.clone());
    let new_right = state.tree.node(new_id).and_then(|n| n.right.clone());

    if old_right.as_ref() == Some(new_id) {
        // `new` is `old`'s direct right child (in-order successor with no
        // deeper left descent, or a one-child promotion). It keeps its own
        // right subtree and inherits `old`'s left child, if any.
        if old_left.is_some() {
            if let Some(node) = state.tree.node_mut(new_id) {
                node.left = old_left;
            }
        }
    } else if old_left.as_ref() == Some(new_id) {
        // One-child promotion from the left: `old` has no right child, so
        // `new` simply moves up with both of its subtrees intact.
    } else {
        // Deep successor: detach `new` from its current parent, promoting its
        // own right child into the vacated slot, then hand it `old`'s
        // children. The successor is a leftmost node, so it has no left child
        // of its own to lose.
        if let Some((parent, side)) = state.tree.parent_of(new_id) {
            state.tree.set_child(&parent, side, new_right);
        }
        if let Some(node) = state.tree.node_mut(new_id) {
            node.left = old_left;
            node.right = old_right;
        }
    }

    if &root == old_id {
        state.tree.set_root(Some(new_id.clone()));
        state.tree.remove_node(old_id);
        state.focus_id = Some(new_id.clone());
        return;
    }

    if let Some((parent, side)) = state.tree.parent_of(old_id) {
        state.tree.set_child(&parent, side, Some(new_id.clone()));
        state.tree.remove_node(old_id);
        state.focus_id = Some(new_id.clone());
    } else {
        warn!("bst/replace-node: parent of old node {old_id} not found");
    }
}
