//! Graph reducer: queue/visited/edge annotations over an immutable graph.

use crate::catalog::Structure;
use crate::operation::Operation;
use crate::reduce::{
    expect_graph_state, ExploredEdge, ReduceError, VisualReducer, VisualState,
};

#[derive(Debug, Default)]
pub struct GraphReducer;

impl VisualReducer for GraphReducer {
    fn structure(&self) -> Structure {
        Structure::Graph
    }

    fn compute(
        &self,
        initial: &VisualState,
        operations: &[Operation],
    ) -> Result<VisualState, ReduceError> {
        let mut state = expect_graph_state(initial)?.clone();

        for op in operations {
            match op {
                Operation::GraphVisit { node_id } => {
                    state.focus_id = Some(node_id.clone());
                }

                Operation::GraphEnqueue { node_id } => {
                    if !state.queue_ids.contains(node_id) {
                        state.queue_ids.push(node_id.clone());
                    }
                }

                Operation::GraphDequeue { node_id } => {
                    if let Some(pos) = state.queue_ids.iter().position(|id| id == node_id) {
                        state.queue_ids.remove(pos);
                    }
                }

                Operation::GraphExploreEdge { from_id, to_id } => {
                    state.explored_edges.push(ExploredEdge {
                        from: from_id.clone(),
                        to: to_id.clone(),
                    });
                }

                Operation::GraphMarkVisited { node_id } => {
                    if !state.visited_ids.contains(node_id) {
                        state.visited_ids.push(node_id.clone());
                    }
                }

                Operation::ArrayCompare { .. }
                | Operation::ArraySwap { .. }
                | Operation::BstVisit { .. }
                | Operation::BstCompare { .. }
                | Operation::BstMoveLeft { .. }
                | Operation::BstMoveRight { .. }
                | Operation::BstCreateNode { .. }
                | Operation::BstAttachNode { .. }
                | Operation::BstDetachNode { .. }
                | Operation::BstReplaceNode { .. }
                | Operation::BstMarkDelete { .. } => {}
            }
        }

        Ok(VisualState::Graph(state))
    }

    fn validate(&self, operations: &[Operation]) -> Result<(), ReduceError> {
        for op in operations {
            let invalid = |detail: String| ReduceError::InvalidOperation {
                kind: op.kind(),
                detail,
            };
            match op {
                Operation::GraphVisit { node_id }
                | Operation::GraphEnqueue { node_id }
                | Operation::GraphDequeue { node_id }
                | Operation::GraphMarkVisited { node_id } => {
                    if node_id.is_empty() {
                        return Err(invalid("missing nodeId".into()));
                    }
                }
                Operation::GraphExploreEdge { from_id, to_id } => {
                    if from_id.is_empty() || to_id.is_empty() {
                        return Err(invalid("missing fromId/toId".into()));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data_structures::{Graph, NodeId};
    use crate::reduce::GraphState;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn initial() -> VisualState {
        let mut graph = Graph::new();
        graph.add_node(id("n0"), "A");
        graph.add_node(id("n1"), "B");
        graph.add_undirected_edge(&id("n0"), &id("n1"));
        VisualState::Graph(GraphState::new(Arc::new(graph)))
    }

    #[test]
    fn enqueue_dequeue_is_fifo_by_id() {
        let out = GraphReducer
            .compute(
                &initial(),
                &[
                    Operation::GraphEnqueue { node_id: id("n0") },
                    Operation::GraphEnqueue { node_id: id("n1") },
                    // Duplicate enqueue is a no-op.
                    Operation::GraphEnqueue { node_id: id("n0") },
                    Operation::GraphDequeue { node_id: id("n0") },
                ],
            )
            .unwrap();
        assert_eq!(out.as_graph().unwrap().queue_ids, vec![id("n1")]);
    }

    #[test]
    fn visited_is_append_once() {
        let out = GraphReducer
            .compute(
                &initial(),
                &[
                    Operation::GraphMarkVisited { node_id: id("n0") },
                    Operation::GraphMarkVisited { node_id: id("n1") },
                    Operation::GraphMarkVisited { node_id: id("n0") },
                ],
            )
            .unwrap();
        assert_eq!(
            out.as_graph().unwrap().visited_ids,
            vec![id("n0"), id("n1")]
        );
    }

    #[test]
    fn explored_edges_accumulate_in_order() {
        let out = GraphReducer
            .compute(
                &initial(),
                &[
                    Operation::GraphExploreEdge {
                        from_id: id("n0"),
                        to_id: id("n1"),
                    },
                    Operation::GraphVisit { node_id: id("n1") },
                ],
            )
            .unwrap();
        let out = out.as_graph().unwrap();
        assert_eq!(
            out.explored_edges,
            vec![ExploredEdge {
                from: id("n0"),
                to: id("n1"),
            }]
        );
        assert_eq!(out.focus_id, Some(id("n1")));
    }

    #[test]
    fn graph_structure_is_shared_not_copied() {
        let start = initial();
        let out = GraphReducer
            .compute(&start, &[Operation::GraphVisit { node_id: id("n0") }])
            .unwrap();
        assert!(Arc::ptr_eq(
            &start.as_graph().unwrap().graph,
            &out.as_graph().unwrap().graph
        ));
    }

    #[test]
    fn validate_rejects_empty_ids() {
        let err = GraphReducer
            .validate(&[Operation::GraphVisit {
                node_id: NodeId::empty(),
            }])
            .unwrap_err();
        assert!(matches!(err, ReduceError::InvalidOperation { .. }));
    }
}
