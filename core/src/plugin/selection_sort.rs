//! Selection sort plugin.

use std::sync::Arc;

use crate::catalog::{Algorithm, Language, Structure};
use crate::operation::Operation;
use crate::plugin::bubble_sort::generate_sort_input;
use crate::plugin::{PluginManifest, SnippetSource};
use crate::snippet::CodeRangeMap;
use crate::step::{LineRange, Step, StepBuilder};
use crate::trace::{AlgorithmInput, TraceError, Tracer};

#[derive(Debug, Default)]
pub struct SelectionSortTracer;

struct Ranges {
    signature: LineRange,
    outer_loop: LineRange,
    inner_loop: LineRange,
    compare: LineRange,
    swap_block: LineRange,
    return_stmt: LineRange,
}

impl Ranges {
    fn resolve(map: &CodeRangeMap) -> Result<Self, TraceError> {
        Ok(Self {
            signature: map.require("signature")?,
            outer_loop: map.require("outerLoop")?,
            inner_loop: map.require("innerLoop")?,
            compare: map.require("compare")?,
            swap_block: map.require("swapBlock")?,
            return_stmt: map.require("returnStmt")?,
        })
    }
}

impl Tracer for SelectionSortTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SelectionSort
    }

    fn structure(&self) -> Structure {
        Structure::Array
    }

    fn build_trace(
        &self,
        input: &AlgorithmInput,
        ranges: &CodeRangeMap,
    ) -> Result<Vec<Step>, TraceError> {
        let values = input.expect_array(self.algorithm())?;
        let r = Ranges::resolve(ranges)?;
        let mut working = values.to_vec();
        let mut builder = StepBuilder::new();

        builder.add(r.signature, "Starting selection sort");

        let n = working.len();
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            builder.add(
                r.outer_loop,
                format!("Selecting minimum for position {i}"),
            );
            for j in i + 1..n {
                builder.add_ops(
                    r.inner_loop,
                    format!("Comparing index {j} with current minimum at {min}"),
                    vec![Operation::ArrayCompare { i: j, j: min }],
                );
                if working[j] < working[min] {
                    min = j;
                    builder.add(r.compare, format!("New minimum at index {j}"));
                }
            }
            if min != i {
                working.swap(i, min);
                builder.add_ops(
                    r.swap_block,
                    format!("Swapping indexes {i} and {min}"),
                    vec![Operation::ArraySwap { i, j: min }],
                );
            } else {
                builder.add(r.swap_block, format!("Position {i} already holds its minimum"));
            }
        }

        builder.add(r.return_stmt, "Array is sorted");
        Ok(builder.build())
    }
}

const TYPESCRIPT_CODE: &str = "\
function selectionSort(values: number[]): number[] {
  for (let i = 0; i < values.length - 1; i++) {
    let min = i;
    for (let j = i + 1; j < values.length; j++) {
      if (values[j] < values[min]) {
        min = j;
      }
    }
    if (min !== i) {
      [values[i], values[min]] = [values[min], values[i]];
    }
  }
  return values;
}
";

fn typescript_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::line(1)),
        ("outerLoop", LineRange::span(2, 3)),
        ("innerLoop", LineRange::line(4)),
        ("compare", LineRange::span(5, 6)),
        ("swapBlock", LineRange::span(9, 11)),
        ("returnStmt", LineRange::line(13)),
    ])
}

const PYTHON_CODE: &str = "\
def selection_sort(values):
    for i in range(len(values) - 1):
        min_index = i
        for j in range(i + 1, len(values)):
            if values[j] < values[min_index]:
                min_index = j
        if min_index != i:
            values[i], values[min_index] = values[min_index], values[i]
    return values
";

fn python_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::line(1)),
        ("outerLoop", LineRange::span(2, 3)),
        ("innerLoop", LineRange::line(4)),
        ("compare", LineRange::span(5, 6)),
        ("swapBlock", LineRange::span(7, 8)),
        ("returnStmt", LineRange::line(9)),
    ])
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        algorithm: Algorithm::SelectionSort,
        structure: Structure::Array,
        languages: vec![Language::TypeScript, Language::Python],
        make_tracer: || Arc::new(SelectionSortTracer),
        snippets: vec![
            SnippetSource {
                language: Language::TypeScript,
                code: TYPESCRIPT_CODE,
                ranges: typescript_ranges(),
            },
            SnippetSource {
                language: Language::Python,
                code: PYTHON_CODE,
                ranges: python_ranges(),
            },
        ],
        input_generator: generate_sort_input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{ArrayReducer, VisualReducer, VisualState};

    fn trace(values: &[i64]) -> Vec<Step> {
        SelectionSortTracer
            .build_trace(
                &AlgorithmInput::Array {
                    values: values.to_vec(),
                },
                &typescript_ranges(),
            )
            .unwrap()
    }

    #[test]
    fn replay_sorts_the_array() {
        let steps = trace(&[64, 25, 12, 22, 11]);
        let ops: Vec<Operation> = steps
            .iter()
            .flat_map(|s| s.operations().iter().cloned())
            .collect();
        let initial = VisualState::initial_for(&AlgorithmInput::Array {
            values: vec![64, 25, 12, 22, 11],
        });
        let out = ArrayReducer.compute(&initial, &ops).unwrap();
        assert_eq!(out.as_array().unwrap().values, vec![11, 12, 22, 25, 64]);
    }

    #[test]
    fn at_most_one_swap_per_outer_pass() {
        let steps = trace(&[5, 1, 4, 2]);
        let swaps = steps
            .iter()
            .flat_map(|s| s.operations())
            .filter(|op| matches!(op, Operation::ArraySwap { .. }))
            .count();
        // n - 1 = 3 outer passes, so never more than 3 swaps.
        assert!(swaps <= 3);
    }

    #[test]
    fn min_already_in_place_emits_no_swap() {
        let steps = trace(&[1, 2]);
        assert!(steps
            .iter()
            .flat_map(|s| s.operations())
            .all(|op| !matches!(op, Operation::ArraySwap { .. })));
        assert!(steps
            .iter()
            .any(|s| s.note.as_deref() == Some("Position 0 already holds its minimum")));
    }

    #[test]
    fn comparisons_always_target_current_minimum() {
        let steps = trace(&[3, 1, 2]);
        // First inner pass: compare(1, 0) then, min moves to 1, compare(2, 1).
        let compares: Vec<(usize, usize)> = steps
            .iter()
            .flat_map(|s| s.operations())
            .filter_map(|op| match op {
                Operation::ArrayCompare { i, j } => Some((*i, *j)),
                _ => None,
            })
            .collect();
        assert_eq!(compares[0], (1, 0));
        assert_eq!(compares[1], (2, 1));
    }
}
