//! Breadth-first search plugin.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::catalog::{Algorithm, Language, Structure};
use crate::data_structures::{Graph, NodeId};
use crate::input::{InputError, InputOptions};
use crate::operation::Operation;
use crate::plugin::{PluginManifest, SnippetSource};
use crate::snippet::CodeRangeMap;
use crate::step::{LineRange, Step, StepBuilder};
use crate::trace::{AlgorithmInput, TraceError, Tracer};

#[derive(Debug, Default)]
pub struct GraphBfsTracer;

struct Ranges {
    signature: LineRange,
    initialization: LineRange,
    dequeue: LineRange,
    visit_node: LineRange,
    explore_neighbors: LineRange,
    check_visited: LineRange,
    mark_visited: LineRange,
    enqueue: LineRange,
    return_result: LineRange,
}

impl Ranges {
    fn resolve(map: &CodeRangeMap) -> Result<Self, TraceError> {
        Ok(Self {
            signature: map.require("signature")?,
            initialization: map.require("initialization")?,
            dequeue: map.require("dequeue")?,
            visit_node: map.require("visitNode")?,
            explore_neighbors: map.require("exploreNeighbors")?,
            check_visited: map.require("checkVisited")?,
            mark_visited: map.require("markVisited")?,
            enqueue: map.require("enqueue")?,
            return_result: map.require("returnResult")?,
        })
    }
}

fn labels(graph: &Graph, ids: impl IntoIterator<Item = NodeId>) -> String {
    ids.into_iter()
        .map(|id| graph.label_of(&id).to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Tracer for GraphBfsTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::GraphBfs
    }

    fn structure(&self) -> Structure {
        Structure::Graph
    }

    fn build_trace(
        &self,
        input: &AlgorithmInput,
        ranges: &CodeRangeMap,
    ) -> Result<Vec<Step>, TraceError> {
        let (graph, start) = input.expect_graph(self.algorithm())?;
        let r = Ranges::resolve(ranges)?;
        let mut builder = StepBuilder::new();

        builder.add(
            r.signature,
            format!("Starting BFS from node {}", graph.label_of(start)),
        );

        let mut visited: Vec<NodeId> = vec![start.clone()];
        let mut queue: VecDeque<NodeId> = VecDeque::from([start.clone()]);
        builder.add_ops(
            r.initialization,
            format!("Mark {} visited and enqueue it", graph.label_of(start)),
            vec![
                Operation::GraphMarkVisited {
                    node_id: start.clone(),
                },
                Operation::GraphEnqueue {
                    node_id: start.clone(),
                },
            ],
        );

        while let Some(current) = queue.pop_front() {
            builder.add_ops(
                r.dequeue,
                format!(
                    "Dequeue {} (queue: [{}])",
                    graph.label_of(&current),
                    labels(graph, queue.iter().cloned())
                ),
                vec![Operation::GraphDequeue {
                    node_id: current.clone(),
                }],
            );
            builder.add_ops(
                r.visit_node,
                format!("Visiting {}", graph.label_of(&current)),
                vec![Operation::GraphVisit {
                    node_id: current.clone(),
                }],
            );
            builder.add(
                r.explore_neighbors,
                format!("Exploring neighbors of {}", graph.label_of(&current)),
            );

            for neighbor in graph.neighbors(&current) {
                builder.add_ops(
                    r.check_visited,
                    format!(
                        "Checking edge {} -> {}",
                        graph.label_of(&current),
                        graph.label_of(neighbor)
                    ),
                    vec![Operation::GraphExploreEdge {
                        from_id: current.clone(),
                        to_id: neighbor.clone(),
                    }],
                );
                if visited.contains(neighbor) {
                    builder.add(
                        r.check_visited,
                        format!("{} is already visited", graph.label_of(neighbor)),
                    );
                } else {
                    visited.push(neighbor.clone());
                    builder.add_ops(
                        r.mark_visited,
                        format!("Marking {} visited", graph.label_of(neighbor)),
                        vec![Operation::GraphMarkVisited {
                            node_id: neighbor.clone(),
                        }],
                    );
                    queue.push_back(neighbor.clone());
                    builder.add_ops(
                        r.enqueue,
                        format!(
                            "Enqueue {} (queue: [{}])",
                            graph.label_of(neighbor),
                            labels(graph, queue.iter().cloned())
                        ),
                        vec![Operation::GraphEnqueue {
                            node_id: neighbor.clone(),
                        }],
                    );
                }
            }
        }

        builder.add(
            r.return_result,
            format!(
                "Traversal complete, visited: [{}]",
                labels(graph, visited)
            ),
        );
        Ok(builder.build())
    }
}

const TYPESCRIPT_CODE: &str = "\
function bfs(graph: Graph, startId: string): string[] {
  const visited = new Set<string>([startId]);
  const queue = [startId];
  const order: string[] = [];
  while (queue.length > 0) {
    const current = queue.shift()!;
    order.push(current);
    for (const neighbor of graph.edges.get(current) ?? []) {
      if (!visited.has(neighbor)) {
        visited.add(neighbor);
        queue.push(neighbor);
      }
    }
  }
  return order;
}
";

fn typescript_ranges() -> CodeRangeMap {
    CodeRangeMap::from_pairs(&[
        ("signature", LineRange::line(1)),
        ("initialization", LineRange::span(2, 4)),
        ("dequeue", LineRange::line(6)),
        ("visitNode", LineRange::line(7)),
        ("exploreNeighbors", LineRange::line(8)),
        ("checkVisited", LineRange::line(9)),
        ("markVisited", LineRange::line(10)),
        ("enqueue", LineRange::line(11)),
        ("returnResult", LineRange::line(15)),
    ])
}

/// Builds a random connected graph: a spanning tree over 5-7 nodes plus a few
/// extra edges. Node labels run A, B, C, ...
fn generate_input(
    rng: &mut dyn RngCore,
    _options: &InputOptions,
) -> Result<AlgorithmInput, InputError> {
    let count = rng.gen_range(5..=7);
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = (0..count).map(|i| NodeId::from(format!("n{i}").as_str())).collect();
    for (i, id) in ids.iter().enumerate() {
        let label = char::from(b'A' + i as u8);
        graph.add_node(id.clone(), label.to_string());
    }

    // Spanning tree: each node after the first attaches to a random earlier
    // node, which guarantees connectivity.
    for i in 1..count {
        let parent = rng.gen_range(0..i);
        graph.add_undirected_edge(&ids[parent], &ids[i]);
    }

    let extra_edges = rng.gen_range(1..=3);
    let mut added = 0;
    let mut attempts = 0;
    while added < extra_edges && attempts < 20 {
        attempts += 1;
        let a = rng.gen_range(0..count);
        let b = rng.gen_range(0..count);
        if a != b && !graph.has_edge(&ids[a], &ids[b]) {
            graph.add_undirected_edge(&ids[a], &ids[b]);
            added += 1;
        }
    }

    let start = ids[0].clone();
    Ok(AlgorithmInput::Graph { graph, start })
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        algorithm: Algorithm::GraphBfs,
        structure: Structure::Graph,
        languages: vec![Language::TypeScript],
        make_tracer: || Arc::new(GraphBfsTracer),
        snippets: vec![SnippetSource {
            language: Language::TypeScript,
            code: TYPESCRIPT_CODE,
            ranges: typescript_ranges(),
        }],
        input_generator: generate_input,
    }
}
