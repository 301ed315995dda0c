//! BST search plugin.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::catalog::{Algorithm, Language, Structure};
use crate::data_structures::Tree;
use crate::input::{InputError, InputOptions};
use crate::operation::Operation;
use crate::plugin::{PluginManifest, SnippetSource};
use crate::snippet::CodeRangeMap;
use crate::step::{LineRange, Step, StepBuilder};
use crate::trace::{AlgorithmInput, TraceError, Tracer};

/// Values used for the fixed demonstration tree: root 50 with two full
/// levels below it.
pub(crate) const SAMPLE_TREE_VALUES: [i64; 7] = [50, 30, 70, 20, 40, 60, 80];

#[derive(Debug, Default)]
pub struct BstSearchTracer;

struct Ranges {
    signature: LineRange,
    main_loop: LineRange,
    return_true: LineRange,
    move_left: LineRange,
    move_right: LineRange,
    return_false: LineRange,
}

impl Ranges {
    fn resolve(map: &CodeRangeMap) -> Result<Self, TraceError> {
        Ok(Self {
            signature: map.require("signature")?,
            main_loop: map.require("loop")?,
            return_true: map.require("returnTrue")?,
            move_left: map.require("moveLeft")?,
            move_right: map.require("moveRight")?,
            return_false: map.require("returnFalse")?,
        })
    }
}

impl Tracer for BstSearchTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BstSearch
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

        builder.add(r.signature, format!("Searching for {key}"));

        let mut current = tree.root().cloned();
        while let Some(id) = current.take() {
            let Some(node) = tree.node(&id) else {
                break;
            };
            builder.add_ops(
                r.main_loop,
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

            if key == node.value {
                builder.add(r.return_true, format!("Found {key}"));
                return Ok(builder.build());
            }

            if key < node.value {
                match &node.left {
                    Some(left) => {
                        builder.add_ops(
                            r.move_left,
                            format!("{key} < {}, moving left", node.value),
                            vec![Operation::BstMoveLeft {
                                from_id: id,
                                to_id: left.clone(),
                            }],
                        );
                        current = Some(left.clone());
                    }
                    None => {
                        builder.add(
                            r.move_left,
                            format!("{key} < {} but there is no left child", node.value),
                        );
                    }
                }
            } else {
                match &node.right {
                    Some(right) => {
                        builder.add_ops(
                            r.move_right,
                            format!("{key} > {}, moving right", node.value),
                            vec![Operation::BstMoveRight {
                                from_id: id,
                                to_id: right.clone(),
                            }],
                        );
                        current = Some(right.clone());
                    }
                    None => {
                        builder.add(
                            r.move_right,
                            format!("{key} > {} but there is no right child", node.value),
                        );
                    }
                }
            }
        }

        builder.add(r.return_false, format!("{key} is not in the tree"));
        Ok(builder.build())
    }
}

const TYPESCRIPT_CODE: &str = "\
function search(root: TreeNode | null, key: number): boolean {
  let current = root;
  while (current !== null) {
    if (key === current.value) {
      return true;
    }
    if (key < current.value) {
      current = current.left;
    } else {
      current = current.right;
    }
  }
  return false;
}
";

fn typescript_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::span(1, 2)),
        ("loop", LineRange::span(3, 4)),
        ("returnTrue", LineRange::line(5)),
        ("moveLeft", LineRange::span(7, 8)),
        ("moveRight", LineRange::span(9, 10)),
        ("returnFalse", LineRange::line(13)),
    ])
}

fn generate_input(
    rng: &mut dyn RngCore,
    _options: &InputOptions,
) -> Result<AlgorithmInput, InputError> {
    let tree = Tree::from_values(&SAMPLE_TREE_VALUES);
    // Half the runs search for a present value, half for a random key that
    // may miss.
    let key = if rng.gen_bool(0.5) {
        SAMPLE_TREE_VALUES[rng.gen_range(0..SAMPLE_TREE_VALUES.len())]
    } else {
        rng.gen_range(10..=90)
    };
    Ok(AlgorithmInput::Bst { tree, key })
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        algorithm: Algorithm::BstSearch,
        structure: Structure::Bst,
        languages: vec![Language::TypeScript],
        make_tracer: || Arc::new(BstSearchTracer),
        snippets: vec![SnippetSource {
            language: Language::TypeScript,
            code: TYPESCRIPT_CODE,
            ranges: typescript_ranges(),
        }],
        input_generator: generate_input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::NodeId;

    fn trace(key: i64) -> Vec<Step> {
        BstSearchTracer
            .build_trace(
                &AlgorithmInput::Bst {
                    tree: Tree::from_values(&SAMPLE_TREE_VALUES),
                    key,
                },
                &typescript_ranges(),
            )
            .unwrap()
    }

    fn visited_ids(steps: &[Step]) -> Vec<NodeId> {
        steps
            .iter()
            .flat_map(|s| s.operations())
            .filter_map(|op| match op {
                Operation::BstVisit { node_id } => Some(node_id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn hit_walks_the_search_path_and_stops() {
        let steps = trace(40);
        assert_eq!(
            visited_ids(&steps),
            vec![NodeId::from("n50"), NodeId::from("n30"), NodeId::from("n40")]
        );
        assert_eq!(steps.last().unwrap().note.as_deref(), Some("Found 40"));
    }

    #[test]
    fn miss_ends_with_not_found() {
        let steps = trace(65);
        assert_eq!(
            visited_ids(&steps),
            vec![NodeId::from("n50"), NodeId::from("n70"), NodeId::from("n60")]
        );
        assert_eq!(
            steps.last().unwrap().note.as_deref(),
            Some("65 is not in the tree")
        );
    }

    #[test]
    fn moves_only_follow_existing_children() {
        // Every move operation must point at a node that exists.
        let tree = Tree::from_values(&SAMPLE_TREE_VALUES);
        for key in [10, 35, 55, 90] {
            for step in trace(key) {
                for op in step.operations() {
                    if let Operation::BstMoveLeft { to_id, .. }
                    | Operation::BstMoveRight { to_id, .. } = op
                    {
                        assert!(tree.contains(to_id));
                    }
                }
            }
        }
    }

    #[test]
    fn empty_tree_is_an_immediate_miss() {
        let steps = BstSearchTracer
            .build_trace(
                &AlgorithmInput::Bst {
                    tree: Tree::empty(),
                    key: 7,
                },
                &typescript_ranges(),
            )
            .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps.last().unwrap().note.as_deref(),
            Some("7 is not in the tree")
        );
    }

    #[test]
    fn wrong_input_variant_is_rejected() {
        let err = BstSearchTracer
            .build_trace(
                &AlgorithmInput::Array { values: vec![1] },
                &typescript_ranges(),
            )
            .unwrap_err();
        assert!(matches!(err, TraceError::InputMismatch { .. }));
    }
}
