//! BST insert plugin.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::catalog::{Algorithm, Language, Structure};
use crate::data_structures::{NodeId, Side, Tree};
use crate::input::{sample_unique_values, InputError, InputOptions};
use crate::operation::Operation;
use crate::plugin::{PluginManifest, SnippetSource};
use crate::snippet::CodeRangeMap;
use crate::step::{LineRange, Step, StepBuilder};
use crate::trace::{AlgorithmInput, TraceError, Tracer};

#[derive(Debug, Default)]
pub struct BstInsertTracer;

struct Ranges {
    signature: LineRange,
    base_case: LineRange,
    compare_left: LineRange,
    recurse_left: LineRange,
    compare_right: LineRange,
    recurse_right: LineRange,
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
            return_node: map.require("returnNode")?,
        })
    }
}

impl BstInsertTracer {
    fn insert_from(
        &self,
        tree: &Tree,
        id: &NodeId,
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
                    self.insert_from(tree, left, key, r, builder);
                }
                None => {
                    let new_id = NodeId::for_value(key);
                    builder.add_ops(
                        r.base_case,
                        format!("Empty left slot found, creating node {key}"),
                        vec![Operation::BstCreateNode {
                            node_id: new_id.clone(),
                            value: key,
                        }],
                    );
                    builder.add_ops(
                        r.recurse_left,
                        format!("Attaching {key} as left child of {}", node.value),
                        vec![Operation::BstAttachNode {
                            parent_id: id.clone(),
                            new_node_id: new_id,
                            side: Side::Left,
                        }],
                    );
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
                    self.insert_from(tree, right, key, r, builder);
                }
                None => {
                    let new_id = NodeId::for_value(key);
                    builder.add_ops(
                        r.base_case,
                        format!("Empty right slot found, creating node {key}"),
                        vec![Operation::BstCreateNode {
                            node_id: new_id.clone(),
                            value: key,
                        }],
                    );
                    builder.add_ops(
                        r.recurse_right,
                        format!("Attaching {key} as right child of {}", node.value),
                        vec![Operation::BstAttachNode {
                            parent_id: id.clone(),
                            new_node_id: new_id,
                            side: Side::Right,
                        }],
                    );
                }
            }
        } else {
            // Duplicate insert: informational only, the tree is unchanged.
            builder.add(
                r.base_case,
                format!("{key} already exists, nothing to insert"),
            );
        }
    }
}

impl Tracer for BstInsertTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BstInsert
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

        builder.add(r.signature, format!("Inserting {key} into the tree"));

        match tree.root() {
            None => {
                let new_id = NodeId::for_value(key);
                builder.add_ops(
                    r.base_case,
                    format!("Tree is empty, creating node {key}"),
                    vec![Operation::BstCreateNode {
                        node_id: new_id.clone(),
                        value: key,
                    }],
                );
                builder.add_ops(
                    r.base_case,
                    format!("Node {key} becomes the root"),
                    vec![Operation::BstAttachNode {
                        parent_id: NodeId::empty(),
                        new_node_id: new_id,
                        side: Side::Left,
                    }],
                );
            }
            Some(root) => self.insert_from(tree, root, key, &r, &mut builder),
        }

        builder.add(r.return_node, "Insert complete");
        Ok(builder.build())
    }
}

const TYPESCRIPT_CODE: &str = "\
function insert(node: TreeNode | null, value: number): TreeNode {
  if (node === null) {
    return { value, left: null, right: null };
  }
  if (value < node.value) {
    node.left = insert(node.left, value);
  } else if (value > node.value) {
    node.right = insert(node.right, value);
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
        ("returnNode", LineRange::line(10)),
    ])
}

pub(crate) fn generate_random_tree(
    rng: &mut dyn RngCore,
) -> Result<(Tree, Vec<i64>), InputError> {
    let count = rng.gen_range(4..=7);
    let values = sample_unique_values(rng, count, 10, 90)?;
    Ok((Tree::from_values(&values), values))
}

fn generate_input(
    rng: &mut dyn RngCore,
    _options: &InputOptions,
) -> Result<AlgorithmInput, InputError> {
    let (tree, values) = generate_random_tree(rng)?;
    let key = loop {
        let candidate = rng.gen_range(10..=90);
        if !values.contains(&candidate) {
            break candidate;
        }
    };
    Ok(AlgorithmInput::Bst { tree, key })
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        algorithm: Algorithm::BstInsert,
        structure: Structure::Bst,
        languages: vec![Language::TypeScript],
        make_tracer: || Arc::new(BstInsertTracer),
        snippets: vec![SnippetSource {
            language: Language::TypeScript,
            code: TYPESCRIPT_CODE,
            ranges: typescript_ranges(),
        }],
        input_generator: generate_input,
    }
}
