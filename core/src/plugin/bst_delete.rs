//! BST delete plugin. Covers all three removal shapes: leaf, one child, and
//! two children with an in-order successor splice.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::catalog::{Algorithm, Language, Structure};
use crate::data_structures::{NodeId, Side, Tree, TreeNode};
use crate::input::{InputError, InputOptions};
use crate::operation::Operation;
use crate::plugin::bst_insert::generate_random_tree;
use crate::plugin::{PluginManifest, SnippetSource};
use crate::snippet::CodeRangeMap;
use crate::step::{LineRange, Step, StepBuilder};
use crate::trace::{AlgorithmInput, TraceError, Tracer};

#[derive(Debug, Default)]
pub struct BstDeleteTracer;

struct Ranges {
    signature: LineRange,
    base_case: LineRange,
    compare_left: LineRange,
    recurse_left: LineRange,
    compare_right: LineRange,
    recurse_right: LineRange,
    leaf_case: LineRange,
    one_child: LineRange,
    two_children: LineRange,
    find_min: LineRange,
    return_node: LineRange,
}

impl Ranges {
    fn resolve(map: &CodeRangeMap) -> Result<Self, TraceError> {
        Ok(Self {
            signature: map.require("signature")?,
            base_case: map.require("baseCase")?,
            compare_left: map.require("compareLeft")?,
            recurse_left: map.require("recurseLeft")?,
            compare_right: map.require("compareRight")?,
            recurse_right: map.require("recurseRight")?,
            leaf_case: map.require("leafCase")?,
            one_child: map.require("oneChild")?,
            two_children: map.require("twoChildren")?,
            find_min: map.require("findMin")?,
            return_node: map.require("returnNode")?,
        })
    }
}

impl BstDeleteTracer {
    fn delete_from(
        &self,
        tree: &Tree,
        id: &NodeId,
        parent: Option<(&NodeId, Side)>,
        key: i64,
        r: &Ranges,
        builder: &mut StepBuilder,
    ) {
        let Some(node) = tree.node(id) else {
            return;
        };
        builder.add_ops(
            r.signature,
            format!("Visiting node {}", node.value),
            vec![
                Operation::BstVisit {
                    node_id: id.clone(),
                },
                Operation::BstCompare {
                    node_id: id.clone(),
                    key,
                },
            ],
        );

        if key < node.value {
            match &node.left {
                Some(left) => {
                    builder.add_ops(
                        r.compare_left,
                        format!("{key} < {}, descending left", node.value),
                        vec![Operation::BstMoveLeft {
                            from_id: id.clone(),
                            to_id: left.clone(),
                        }],
                    );
                    self.delete_from(tree, left, Some((id, Side::Left)), key, r, builder);
                }
                None => {
                    builder.add(r.base_case, format!("{key} is not in the tree"));
                }
            }
        } else if key > node.value {
            match &node.right {
                Some(right) => {
                    builder.add_ops(
                        r.compare_right,
                        format!("{key} > {}, descending right", node.value),
                        vec![Operation::BstMoveRight {
                            from_id: id.clone(),
                            to_id: right.clone(),
                        }],
                    );
                    self.delete_from(tree, right, Some((id, Side::Right)), key, r, builder);
                }
                None => {
                    builder.add(r.base_case, format!("{key} is not in the tree"));
                }
            }
        } else {
            self.remove_found(tree, id, node, parent, r, builder);
        }
    }

    fn remove_found(
        &self,
        tree: &Tree,
        id: &NodeId,
        node: &TreeNode,
        parent: Option<(&NodeId, Side)>,
        r: &Ranges,
        builder: &mut StepBuilder,
    ) {
        match (&node.left, &node.right) {
            (None, None) => {
                builder.add_ops(
                    r.leaf_case,
                    format!("Node {} is a leaf, marking for removal", node.value),
                    vec![Operation::BstMarkDelete {
                        node_id: id.clone(),
                    }],
                );
                match parent {
                    Some((parent_id, side)) => {
                        builder.add_ops(
                            r.leaf_case,
                            format!("Detaching leaf {}", node.value),
                            vec![Operation::BstDetachNode {
                                parent_id: parent_id.clone(),
                                node_id: id.clone(),
                                side,
                            }],
                        );
                    }
                    None => {
                        builder.add_ops(
                            r.leaf_case,
                            "Root is a leaf, the tree becomes empty",
                            vec![Operation::BstDetachNode {
                                parent_id: NodeId::empty(),
                                node_id: id.clone(),
                                side: Side::Left,
                            }],
                        );
                    }
                }
            }

            (Some(child), None) | (None, Some(child)) => {
                builder.add_ops(
                    r.one_child,
                    format!("Node {} has one child, marking for removal", node.value),
                    vec![Operation::BstMarkDelete {
                        node_id: id.clone(),
                    }],
                );
                builder.add_ops(
                    r.one_child,
                    format!(
                        "Promoting child to take the place of {}",
                        node.value
                    ),
                    vec![Operation::BstReplaceNode {
                        old_node_id: id.clone(),
                        new_node_id: child.clone(),
                    }],
                );
            }

            (Some(_), Some(right)) => {
                builder.add_ops(
                    r.two_children,
                    format!("Node {} has two children, marking for removal", node.value),
                    vec![Operation::BstMarkDelete {
                        node_id: id.clone(),
                    }],
                );
                builder.add(
                    r.find_min,
                    "Finding the in-order successor in the right subtree",
                );
                let successor = self.find_min(tree, right, r, builder);
                builder.add_ops(
                    r.two_children,
                    format!("Replacing {} with its successor", node.value),
                    vec![Operation::BstReplaceNode {
                        old_node_id: id.clone(),
                        new_node_id: successor,
                    }],
                );
            }
        }
    }

    /// Walks to the leftmost node of the subtree rooted at `start`, emitting
    /// visit and move steps along the way.
    fn find_min(
        &self,
        tree: &Tree,
        start: &NodeId,
        r: &Ranges,
        builder: &mut StepBuilder,
    ) -> NodeId {
        let mut current = start.clone();
        loop {
            let Some(node) = tree.node(&current) else {
                return current;
            };
            builder.add_ops(
                r.find_min,
                format!("Visiting node {}", node.value),
                vec![Operation::BstVisit {
                    node_id: current.clone(),
                }],
            );
            match &node.left {
                Some(left) => {
                    builder.add_ops(
                        r.find_min,
                        "Moving left toward the minimum",
                        vec![Operation::BstMoveLeft {
                            from_id: current.clone(),
                            to_id: left.clone(),
                        }],
                    );
                    current = left.clone();
                }
                None => {
                    builder.add(r.find_min, format!("Successor is {}", node.value));
                    return current;
                }
            }
        }
    }
}

impl Tracer for BstDeleteTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BstDelete
    }

    fn structure(&self) -> Structure {
        Structure::Bst
    }

    fn build_trace(
        &self,
        input: &AlgorithmInput,
        ranges: &CodeRangeMap,
    ) -> Result<Vec<Step>, TraceError> {
        let (tree, key) = input.expect_bst(self.algorithm())?;
        let r = Ranges::resolve(ranges)?;
        let mut builder = StepBuilder::new();

        builder.add(r.signature, format!("Deleting {key} from the tree"));

        match tree.root() {
            None => {
                builder.add(r.base_case, format!("Tree is empty, {key} not found"));
            }
            Some(root) => self.delete_from(tree, root, None, key, &r, &mut builder),
        }

        builder.add(r.return_node, "Delete complete");
        Ok(builder.build())
    }
}

const TYPESCRIPT_CODE: &str = "\
function remove(node: TreeNode | null, value: number): TreeNode | null {
  if (node === null) {
    return null;
  }
  if (value < node.value) {
    node.left = remove(node.left, value);
  } else if (value > node.value) {
    node.right = remove(node.right, value);
  } else {
    if (node.left === null && node.right === null) {
      return null;
    }
    if (node.left === null || node.right === null) {
      return node.left ?? node.right;
    }
    const successor = findMin(node.right);
    node.value = successor.value;
    node.right = remove(node.right, successor.value);
  }
  return node;
}

function findMin(node: TreeNode): TreeNode {
  while (node.left !== null) {
    node = node.left;
  }
  return node;
}
";

fn typescript_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::line(1)),
        ("baseCase", LineRange::span(2, 3)),
        ("compareLeft", LineRange::line(5)),
        ("recurseLeft", LineRange::line(6)),
        ("compareRight", LineRange::line(7)),
        ("recurseRight", LineRange::line(8)),
        ("leafCase", LineRange::span(10, 11)),
        ("oneChild", LineRange::span(13, 14)),
        ("twoChildren", LineRange::span(16, 18)),
        ("findMin", LineRange::span(23, 27)),
        ("returnNode", LineRange::line(20)),
    ])
}

fn generate_input(
    rng: &mut dyn RngCore,
    _options: &InputOptions,
) -> Result<AlgorithmInput, InputError> {
    let (tree, values) = generate_random_tree(rng)?;
    // Always delete a value that exists so every run shows a removal shape.
    let key = values[rng.gen_range(0..values.len())];
    Ok(AlgorithmInput::Bst { tree, key })
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        algorithm: Algorithm::BstDelete,
        structure: Structure::Bst,
        languages: vec![Language::TypeScript],
        make_tracer: || Arc::new(BstDeleteTracer),
        snippets: vec![SnippetSource {
            language: Language::TypeScript,
            code: TYPESCRIPT_CODE,
            ranges: typescript_ranges(),
        }],
        input_generator: generate_input,
    }
}
