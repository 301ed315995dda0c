//! Array reducer: interprets `array/compare` and `array/swap`.

use log::warn;

use crate::catalog::Structure;
use crate::operation::Operation;
use crate::reduce::{expect_array_state, Focus, ReduceError, VisualReducer, VisualState};

#[derive(Debug, Default)]
pub struct ArrayReducer;

impl VisualReducer for ArrayReducer {
    fn structure(&self) -> Structure {
        Structure::Array
    }

    fn compute(
        &self,
        initial: &VisualState,
        operations: &[Operation],
    ) -> Result<VisualState, ReduceError> {
        let mut state = expect_array_state(initial)?.clone();

        for op in operations {
            match op {
                Operation::ArrayCompare { i, j } => {
                    state.focus = Some(Focus::pair(*i, *j));
                }
                Operation::ArraySwap { i, j } => {
                    if *i < state.values.len() && *j < state.values.len() {
                        state.values.swap(*i, *j);
                        state.focus = Some(Focus::pair(*i, *j));
                    } else {
                        // Replay anomaly: indices outside the array.
                        warn!(
                            "array/swap out of bounds: i={i}, j={j}, len={}",
                            state.values.len()
                        );
                    }
                }

                // Operations from other structure domains are ignored here;
                // each reducer only interprets its own vocabulary.
                Operation::BstVisit { .. }
                | Operation::BstCompare { .. }
                | Operation::BstMoveLeft { .. }
                | Operation::BstMoveRight { .. }
                | Operation::BstCreateNode { .. }
                | Operation::BstAttachNode { .. }
                | Operation::BstDetachNode { .. }
                | Operation::BstReplaceNode { .. }
                | Operation::BstMarkDelete { .. }
                | Operation::GraphVisit { .. }
                | Operation::GraphEnqueue { .. }
                | Operation::GraphDequeue { .. }
                | Operation::GraphExploreEdge { .. }
                | Operation::GraphMarkVisited { .. } => {}
            }
        }

        Ok(VisualState::Array(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::ArrayState;

    fn initial(values: &[i64]) -> VisualState {
        VisualState::Array(ArrayState::new(values.to_vec()))
    }

    #[test]
    fn compare_only_moves_focus() {
        let start = initial(&[5, 3, 1]);
        let out = ArrayReducer
            .compute(&start, &[Operation::ArrayCompare { i: 0, j: 1 }])
            .unwrap();
        let out = out.as_array().unwrap();
        assert_eq!(out.values, vec![5, 3, 1]);
        assert_eq!(out.focus, Some(Focus::pair(0, 1)));
    }

    #[test]
    fn swap_exchanges_values_and_focuses_pair() {
        let start = initial(&[5, 3, 1]);
        let out = ArrayReducer
            .compute(
                &start,
                &[
                    Operation::ArraySwap { i: 0, j: 1 },
                    Operation::ArraySwap { i: 1, j: 2 },
                ],
            )
            .unwrap();
        let out = out.as_array().unwrap();
        assert_eq!(out.values, vec![3, 1, 5]);
        assert_eq!(out.focus, Some(Focus::pair(1, 2)));
    }

    #[test]
    fn out_of_bounds_swap_is_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let start = initial(&[5, 3]);
        let out = ArrayReducer
            .compute(&start, &[Operation::ArraySwap { i: 0, j: 9 }])
            .unwrap();
        assert_eq!(out.as_array().unwrap().values, vec![5, 3]);
    }

    #[test]
    fn initial_state_is_not_mutated() {
        let start = initial(&[2, 1]);
        let snapshot = start.clone();
        let _ = ArrayReducer
            .compute(&start, &[Operation::ArraySwap { i: 0, j: 1 }])
            .unwrap();
        assert_eq!(start, snapshot);
    }

    #[test]
    fn foreign_operations_are_ignored() {
        use crate::data_structures::NodeId;
        let start = initial(&[1, 2]);
        let out = ArrayReducer
            .compute(
                &start,
                &[Operation::GraphVisit {
                    node_id: NodeId::from("n0"),
                }],
            )
            .unwrap();
        assert_eq!(out, start);
    }
}
