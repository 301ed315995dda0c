//! Bubble sort plugin: tracer, snippets, and input generator.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::catalog::{Algorithm, Language, Structure};
use crate::input::{check_range, sample_unique_values, InputError, InputOptions};
use crate::operation::Operation;
use crate::plugin::{PluginManifest, SnippetSource};
use crate::snippet::CodeRangeMap;
use crate::step::{LineRange, Step, StepBuilder};
use crate::trace::{AlgorithmInput, TraceError, Tracer};

#[derive(Debug, Default)]
pub struct BubbleSortTracer;

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

impl Tracer for BubbleSortTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BubbleSort
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

        builder.add(r.signature, "Starting bubble sort");

        let n = working.len();
        for i in 0..n.saturating_sub(1) {
            builder.add(r.outer_loop, format!("Outer pass {}", i + 1));
            for j in 0..n - i - 1 {
                builder.add_ops(
                    r.inner_loop,
                    format!("Comparing indexes {} and {}", j, j + 1),
                    vec![Operation::ArrayCompare { i: j, j: j + 1 }],
                );
                if working[j] > working[j + 1] {
                    working.swap(j, j + 1);
                    builder.add_ops(
                        r.swap_block,
                        format!("Swapping indexes {} and {}", j, j + 1),
                        vec![Operation::ArraySwap { i: j, j: j + 1 }],
                    );
                } else {
                    builder.add(r.compare, "No swap needed");
                }
            }
        }

        builder.add(r.return_stmt, "Array is sorted");
        Ok(builder.build())
    }
}

const TYPESCRIPT_CODE: &str = "\
function bubbleSort(values: number[]): number[] {
  for (let i = 0; i < values.length - 1; i++) {
    for (let j = 0; j < values.length - i - 1; j++) {
      if (values[j] > values[j + 1]) {
        const tmp = values[j];
        values[j] = values[j + 1];
        values[j + 1] = tmp;
      }
    }
  }
  return values;
}
";

fn typescript_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::line(1)),
        ("outerLoop", LineRange::line(2)),
        ("innerLoop", LineRange::line(3)),
        ("compare", LineRange::line(4)),
        ("swapBlock", LineRange::span(5, 7)),
        ("returnStmt", LineRange::line(11)),
    ])
}

const PYTHON_CODE: &str = "\
def bubble_sort(values):
    n = len(values)
    for i in range(n - 1):
        for j in range(n - i - 1):
            if values[j] > values[j + 1]:
                values[j], values[j + 1] = values[j + 1], values[j]
    return values
";

fn python_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::span(1, 2)),
        ("outerLoop", LineRange::line(3)),
        ("innerLoop", LineRange::line(4)),
        ("compare", LineRange::line(5)),
        ("swapBlock", LineRange::line(6)),
        ("returnStmt", LineRange::line(7)),
    ])
}

pub(crate) fn generate_sort_input(
    rng: &mut dyn RngCore,
    options: &InputOptions,
) -> Result<AlgorithmInput, InputError> {
    check_range(options)?;
    let size = options.size.max(1);
    let values = if options.unique {
        sample_unique_values(rng, size, options.min, options.max)?
    } else {
        (0..size)
            .map(|_| rng.gen_range(options.min..=options.max))
            .collect()
    };
    Ok(AlgorithmInput::Array { values })
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        algorithm: Algorithm::BubbleSort,
        structure: Structure::Array,
        languages: vec![Language::TypeScript, Language::Python],
        make_tracer: || Arc::new(BubbleSortTracer),
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
