//! The tracer contract: deterministic execution of an algorithm over a typed
//! input, producing an ordered step sequence.
//!
//! Tracers own no state between calls, never mutate the supplied input
//! (working copies only), and are fully deterministic for a given input and
//! code-range map: re-running a trace yields an identical step sequence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Algorithm, Structure};
use crate::data_structures::{Graph, NodeId, Tree};
use crate::snippet::CodeRangeMap;
use crate::step::Step;

/// Typed input for one trace run. The variant must match the structure kind
/// the selected tracer targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "structure", rename_all = "lowercase")]
pub enum AlgorithmInput {
    Array { values: Vec<i64> },
    Bst { tree: Tree, key: i64 },
    Graph { graph: Graph, start: NodeId },
}

impl AlgorithmInput {
    pub fn structure(&self) -> Structure {
        match self {
            AlgorithmInput::Array { .. } => Structure::Array,
            AlgorithmInput::Bst { .. } => Structure::Bst,
            AlgorithmInput::Graph { .. } => Structure::Graph,
        }
    }

    pub fn expect_array(&self, algorithm: Algorithm) -> Result<&[i64], TraceError> {
        match self {
            AlgorithmInput::Array { values } => Ok(values),
            _ => Err(TraceError::input_mismatch(algorithm, Structure::Array, self)),
        }
    }

    pub fn expect_bst(&self, algorithm: Algorithm) -> Result<(&Tree, i64), TraceError> {
        match self {
            AlgorithmInput::Bst { tree, key } => Ok((tree, *key)),
            _ => Err(TraceError::input_mismatch(algorithm, Structure::Bst, self)),
        }
    }

    pub fn expect_graph(&self, algorithm: Algorithm) -> Result<(&Graph, &NodeId), TraceError> {
        match self {
            AlgorithmInput::Graph { graph, start } => Ok((graph, start)),
            _ => Err(TraceError::input_mismatch(algorithm, Structure::Graph, self)),
        }
    }
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("{algorithm} expects {expected} input, got {actual}")]
    InputMismatch {
        algorithm: Algorithm,
        expected: Structure,
        actual: Structure,
    },

    #[error("code range map is missing label `{label}`")]
    MissingRange { label: String },
}

impl TraceError {
    fn input_mismatch(algorithm: Algorithm, expected: Structure, actual: &AlgorithmInput) -> Self {
        TraceError::InputMismatch {
            algorithm,
            expected,
            actual: actual.structure(),
        }
    }
}

/// Algorithm tracer: given an input and a code-range map, produce the full
/// step-by-step trace. Agnostic of UI and rendering; only emits semantic
/// steps.
pub trait Tracer: Send + Sync + std::fmt::Debug {
    /// Algorithm this tracer implements.
    fn algorithm(&self) -> Algorithm;

    /// Structure kind its operations target; selects the reducer.
    fn structure(&self) -> Structure;

    /// Generates the trace. Read-only with respect to `input`.
    fn build_trace(
        &self,
        input: &AlgorithmInput,
        ranges: &CodeRangeMap,
    ) -> Result<Vec<Step>, TraceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_helpers_check_the_variant() {
        let input = AlgorithmInput::Array {
            values: vec![3, 1, 2],
        };
        assert!(input.expect_array(Algorithm::BubbleSort).is_ok());

        let err = input.expect_bst(Algorithm::BstSearch).unwrap_err();
        assert!(matches!(
            err,
            TraceError::InputMismatch {
                expected: Structure::Bst,
                actual: Structure::Array,
                ..
            }
        ));
    }

    #[test]
    fn input_serializes_with_structure_tag() {
        let input = AlgorithmInput::Array { values: vec![1, 2] };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["structure"], "array");
    }
}
