//! Engine facade tying registries together: generate an input, build a
//! trace, and compute the visual state at any timeline position.

use log::debug;
use rand::RngCore;

use crate::catalog::{Algorithm, Language, Structure};
use crate::error::EngineError;
use crate::input::InputOptions;
use crate::operation::Operation;
use crate::plugin::EngineContext;
use crate::reduce::VisualState;
use crate::snippet::Snippet;
use crate::step::Step;
use crate::trace::AlgorithmInput;

/// A completed trace: the step sequence plus the structure kind that selects
/// its reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutput {
    pub structure: Structure,
    pub steps: Vec<Step>,
}

impl TraceOutput {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Stateless facade over an [`EngineContext`]. All session state (current
/// input, trace, timeline index) lives with the caller.
pub struct Runner<'a> {
    context: &'a EngineContext,
}

impl<'a> Runner<'a> {
    pub fn new(context: &'a EngineContext) -> Self {
        Self { context }
    }

    /// Generates a fresh input for `algorithm` from the caller's RNG.
    pub fn generate_input(
        &self,
        algorithm: Algorithm,
        rng: &mut dyn RngCore,
        options: &InputOptions,
    ) -> Result<AlgorithmInput, EngineError> {
        let generator = self.context.inputs.get(algorithm)?;
        Ok(generator(rng, options)?)
    }

    /// [`Runner::generate_input`] with the thread-local RNG, for hosts that
    /// do not need reproducible inputs.
    pub fn generate_random_input(
        &self,
        algorithm: Algorithm,
        options: &InputOptions,
    ) -> Result<AlgorithmInput, EngineError> {
        self.generate_input(algorithm, &mut rand::thread_rng(), options)
    }

    pub fn snippet(
        &self,
        algorithm: Algorithm,
        language: Language,
    ) -> Result<&Snippet, EngineError> {
        Ok(self.context.snippets.get(algorithm, language)?)
    }

    /// Runs the tracer for `(algorithm, language)` over `input`.
    pub fn build_trace(
        &self,
        algorithm: Algorithm,
        language: Language,
        input: &AlgorithmInput,
    ) -> Result<TraceOutput, EngineError> {
        let tracer = self.context.tracers.get(algorithm, language)?;
        let snippet = self.context.snippets.get(algorithm, language)?;
        let steps = tracer.build_trace(input, &snippet.ranges)?;
        debug!("traced {algorithm}:{language}: {} steps", steps.len());
        Ok(TraceOutput {
            structure: tracer.structure(),
            steps,
        })
    }

    /// Computes the visual state after replaying steps `0..=index`.
    ///
    /// `index` is clamped to the last step, so seeking past the end yields
    /// the final state; an empty trace yields the initial state.
    pub fn compute_visual_state(
        &self,
        input: &AlgorithmInput,
        trace: &TraceOutput,
        index: usize,
    ) -> Result<VisualState, EngineError> {
        let reducer = self.context.reducers.get(trace.structure)?;
        let initial = VisualState::initial_for(input);
        if trace.steps.is_empty() {
            return Ok(initial);
        }
        let clamped = index.min(trace.steps.len() - 1);
        let operations: Vec<Operation> = trace.steps[..=clamped]
            .iter()
            .flat_map(|step| step.operations().iter().cloned())
            .collect();
        Ok(reducer.compute(&initial, &operations)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EngineContext {
        EngineContext::bootstrap().unwrap()
    }

    #[test]
    fn trace_and_replay_sorts_the_input() {
        let context = context();
        let runner = Runner::new(&context);
        let input = AlgorithmInput::Array {
            values: vec![5, 3, 1],
        };
        let trace = runner
            .build_trace(Algorithm::BubbleSort, Language::TypeScript, &input)
            .unwrap();
        assert_eq!(trace.structure, Structure::Array);

        let final_state = runner
            .compute_visual_state(&input, &trace, trace.len() - 1)
            .unwrap();
        assert_eq!(final_state.as_array().unwrap().values, vec![1, 3, 5]);
    }

    #[test]
    fn index_past_the_end_is_clamped_to_the_final_state() {
        let context = context();
        let runner = Runner::new(&context);
        let input = AlgorithmInput::Array {
            values: vec![2, 1],
        };
        let trace = runner
            .build_trace(Algorithm::BubbleSort, Language::Python, &input)
            .unwrap();
        let at_end = runner
            .compute_visual_state(&input, &trace, trace.len() - 1)
            .unwrap();
        let past_end = runner
            .compute_visual_state(&input, &trace, trace.len() + 100)
            .unwrap();
        assert_eq!(at_end, past_end);
    }

    #[test]
    fn index_zero_replays_only_the_first_step() {
        let context = context();
        let runner = Runner::new(&context);
        let input = AlgorithmInput::Array {
            values: vec![2, 1],
        };
        let trace = runner
            .build_trace(Algorithm::BubbleSort, Language::TypeScript, &input)
            .unwrap();
        // First step is the informational signature highlight.
        let state = runner.compute_visual_state(&input, &trace, 0).unwrap();
        assert_eq!(state.as_array().unwrap().values, vec![2, 1]);
        assert!(state.as_array().unwrap().focus.is_none());
    }

    #[test]
    fn unknown_language_pairing_is_an_error() {
        let context = context();
        let runner = Runner::new(&context);
        let input = AlgorithmInput::Array { values: vec![1] };
        assert!(runner
            .build_trace(Algorithm::BubbleSort, Language::C, &input)
            .is_err());
    }

    #[test]
    fn bst_insert_then_delete_round_trips_the_tree() {
        use crate::data_structures::Tree;

        let context = context();
        let runner = Runner::new(&context);
        let tree = Tree::from_values(&[50, 30, 70, 20, 40, 60, 80]);

        // Insert 25, replay to get the grown tree.
        let input = AlgorithmInput::Bst {
            tree: tree.clone(),
            key: 25,
        };
        let trace = runner
            .build_trace(Algorithm::BstInsert, Language::TypeScript, &input)
            .unwrap();
        let grown = runner
            .compute_visual_state(&input, &trace, trace.len() - 1)
            .unwrap();
        let grown = grown.as_tree().unwrap().tree.clone();
        assert!(grown.find_value(25).is_some());

        // Search finds it in the grown tree.
        let input = AlgorithmInput::Bst {
            tree: grown.clone(),
            key: 25,
        };
        let search = runner
            .build_trace(Algorithm::BstSearch, Language::TypeScript, &input)
            .unwrap();
        assert_eq!(
            search.steps.last().unwrap().note.as_deref(),
            Some("Found 25")
        );

        // Delete it again; the replayed tree matches the original contents.
        let input = AlgorithmInput::Bst {
            tree: grown,
            key: 25,
        };
        let trace = runner
            .build_trace(Algorithm::BstDelete, Language::TypeScript, &input)
            .unwrap();
        let shrunk = runner
            .compute_visual_state(&input, &trace, trace.len() - 1)
            .unwrap();
        let shrunk = &shrunk.as_tree().unwrap().tree;
        assert_eq!(shrunk.in_order_values(), tree.in_order_values());
        assert!(shrunk.is_valid_bst());
    }

    #[test]
    fn bfs_visits_every_node_of_a_generated_graph() {
        use rand::SeedableRng;

        let context = context();
        let runner = Runner::new(&context);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(21);
        let input = runner
            .generate_input(Algorithm::GraphBfs, &mut rng, &InputOptions::default())
            .unwrap();
        let trace = runner
            .build_trace(Algorithm::GraphBfs, Language::TypeScript, &input)
            .unwrap();
        let state = runner
            .compute_visual_state(&input, &trace, trace.len() - 1)
            .unwrap();
        let state = state.as_graph().unwrap();

        let (graph, start) = input.expect_graph(Algorithm::GraphBfs).unwrap();
        assert_eq!(state.visited_ids.len(), graph.node_count());
        assert_eq!(state.visited_ids.first(), Some(start));
        assert!(state.queue_ids.is_empty());
    }

    #[test]
    fn replaying_the_same_trace_twice_is_identical() {
        let context = context();
        let runner = Runner::new(&context);
        let input = AlgorithmInput::Array {
            values: vec![4, 1, 3, 2],
        };
        let a = runner
            .build_trace(Algorithm::SelectionSort, Language::TypeScript, &input)
            .unwrap();
        let b = runner
            .build_trace(Algorithm::SelectionSort, Language::TypeScript, &input)
            .unwrap();
        assert_eq!(a, b);

        for index in 0..a.len() {
            let x = runner.compute_visual_state(&input, &a, index).unwrap();
            let y = runner.compute_visual_state(&input, &b, index).unwrap();
            assert_eq!(x, y);
        }
    }

    #[test]
    fn generated_inputs_match_the_algorithm_structure() {
        use rand::SeedableRng;
        let context = context();
        let runner = Runner::new(&context);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(9);
        for (algorithm, structure) in [
            (Algorithm::BubbleSort, Structure::Array),
            (Algorithm::BstInsert, Structure::Bst),
            (Algorithm::GraphBfs, Structure::Graph),
        ] {
            let input = runner
                .generate_input(algorithm, &mut rng, &InputOptions::default())
                .unwrap();
            assert_eq!(input.structure(), structure);
        }
    }
}
