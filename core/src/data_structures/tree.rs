//! Arena-backed binary search tree.
//!
//! Nodes live in an id-indexed map and reference children by [`NodeId`], so a
//! tree clone is a copy of the map, not a pointer-chasing deep clone. The map
//! sits behind an `Arc` with copy-on-write mutation: traversal-only replays
//! share the node arena between states, and the first structural edit of a
//! replay batch pays for the copy.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{NodeId, Side};

/// A single node record. Children are ids into the owning tree's arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<&NodeId> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Binary search tree addressed by stable node ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    root: Option<NodeId>,
    nodes: Arc<BTreeMap<NodeId, TreeNode>>,
}

impl Tree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a tree by BST-inserting `values` in order. Duplicate values are
    /// ignored; node ids follow the `n<value>` convention.
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = Tree::empty();
        for &value in values {
            tree.insert_value(value);
        }
        tree
    }

    pub fn root(&self) -> Option<&NodeId> {
        self.root.as_ref()
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub fn node(&self, id: &NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn value_of(&self, id: &NodeId) -> Option<i64> {
        self.nodes.get(id).map(|n| n.value)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `id` into the arena without linking it anywhere.
    pub fn insert_node(&mut self, id: NodeId, node: TreeNode) {
        Arc::make_mut(&mut self.nodes).insert(id, node);
    }

    /// Removes a node record from the arena. Links pointing at it are the
    /// caller's responsibility.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<TreeNode> {
        Arc::make_mut(&mut self.nodes).remove(id)
    }

    /// Rewrites one child slot of `parent`. Returns false when the parent is
    /// not in the arena.
    pub fn set_child(&mut self, parent: &NodeId, side: Side, child: Option<NodeId>) -> bool {
        match Arc::make_mut(&mut self.nodes).get_mut(parent) {
            Some(node) => {
                node.set_child(side, child);
                true
            }
            None => false,
        }
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut TreeNode> {
        Arc::make_mut(&mut self.nodes).get_mut(id)
    }

    /// Finds the parent of `child` and which slot it occupies, by depth-first
    /// search from the root. First match wins; ids are assumed unique.
    pub fn parent_of(&self, child: &NodeId) -> Option<(NodeId, Side)> {
        fn walk(tree: &Tree, current: &NodeId, child: &NodeId) -> Option<(NodeId, Side)> {
            let node = tree.node(current)?;
            for side in [Side::Left, Side::Right] {
                if let Some(next) = node.child(side) {
                    if next == child {
                        return Some((current.clone(), side));
                    }
                    if let Some(found) = walk(tree, next, child) {
                        return Some(found);
                    }
                }
            }
            None
        }
        let root = self.root.as_ref()?;
        if root == child {
            return None;
        }
        walk(self, root, child)
    }

    /// Finds the id of the node holding `value`, following BST ordering.
    pub fn find_value(&self, value: i64) -> Option<&NodeId> {
        let mut current = self.root.as_ref();
        while let Some(id) = current {
            let node = self.node(id)?;
            if value == node.value {
                return Some(id);
            }
            current = if value < node.value {
                node.left.as_ref()
            } else {
                node.right.as_ref()
            };
        }
        None
    }

    /// Standard BST insert used by input generators. No-op for duplicates.
    pub fn insert_value(&mut self, value: i64) {
        let new_id = NodeId::for_value(value);
        let Some(root) = self.root.clone() else {
            self.insert_node(new_id.clone(), TreeNode::leaf(value));
            self.root = Some(new_id);
            return;
        };

        let mut current = root;
        loop {
            let node = match self.node(&current) {
                Some(node) => node.clone(),
                None => return,
            };
            if value == node.value {
                return;
            }
            let side = if value < node.value {
                Side::Left
            } else {
                Side::Right
            };
            match node.child(side) {
                Some(next) => current = next.clone(),
                None => {
                    self.insert_node(new_id.clone(), TreeNode::leaf(value));
                    self.set_child(&current, side, Some(new_id));
                    return;
                }
            }
        }
    }

    /// In-order value sequence; ascending iff the tree is a valid BST.
    pub fn in_order_values(&self) -> Vec<i64> {
        fn walk(tree: &Tree, id: &NodeId, out: &mut Vec<i64>) {
            if let Some(node) = tree.node(id) {
                if let Some(left) = &node.left {
                    walk(tree, left, out);
                }
                out.push(node.value);
                if let Some(right) = &node.right {
                    walk(tree, right, out);
                }
            }
        }
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            walk(self, root, &mut out);
        }
        out
    }

    /// Checks `left.value < node.value < right.value` recursively.
    pub fn is_valid_bst(&self) -> bool {
        fn walk(tree: &Tree, id: &NodeId, low: Option<i64>, high: Option<i64>) -> bool {
            let Some(node) = tree.node(id) else {
                return false;
            };
            if low.is_some_and(|low| node.value <= low) {
                return false;
            }
            if high.is_some_and(|high| node.value >= high) {
                return false;
            }
            node.left
                .as_ref()
                .map_or(true, |left| walk(tree, left, low, Some(node.value)))
                && node
                    .right
                    .as_ref()
                    .map_or(true, |right| walk(tree, right, Some(node.value), high))
        }
        match &self.root {
            Some(root) => walk(self, root, None, None),
            None => true,
        }
    }

    /// True when this tree and `other` share the same node arena allocation.
    /// Used to assert structural sharing for traversal-only replays.
    pub fn shares_arena_with(&self, other: &Tree) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::from_values(&[50, 30, 70, 20, 40, 60, 80])
    }

    #[test]
    fn from_values_builds_a_valid_bst() {
        let tree = sample();
        assert_eq!(tree.len(), 7);
        assert!(tree.is_valid_bst());
        assert_eq!(tree.in_order_values(), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.root(), Some(&NodeId::from("n50")));
    }

    #[test]
    fn duplicates_are_ignored() {
        let tree = Tree::from_values(&[10, 10, 10]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn parent_of_reports_slot() {
        let tree = sample();
        assert_eq!(
            tree.parent_of(&NodeId::from("n30")),
            Some((NodeId::from("n50"), Side::Left))
        );
        assert_eq!(
            tree.parent_of(&NodeId::from("n80")),
            Some((NodeId::from("n70"), Side::Right))
        );
        assert_eq!(tree.parent_of(&NodeId::from("n50")), None);
    }

    #[test]
    fn find_value_follows_ordering() {
        let tree = sample();
        assert_eq!(tree.find_value(40), Some(&NodeId::from("n40")));
        assert_eq!(tree.find_value(41), None);
    }

    #[test]
    fn clones_share_until_mutated() {
        let tree = sample();
        let copy = tree.clone();
        assert!(tree.shares_arena_with(&copy));

        let mut edited = tree.clone();
        edited.set_child(&NodeId::from("n20"), Side::Left, None);
        assert!(!tree.shares_arena_with(&edited));
        // Original unaffected by the copy-on-write edit.
        assert_eq!(tree.len(), edited.len());
        assert!(tree.is_valid_bst());
    }

    #[test]
    fn invalid_bst_is_detected() {
        let mut tree = sample();
        tree.node_mut(&NodeId::from("n20")).unwrap().value = 99;
        assert!(!tree.is_valid_bst());
    }
}
