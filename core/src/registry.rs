//! Lookup tables from identifier keys to pure engine components.
//!
//! Registries are populated once at startup by the plugin loader and treated
//! as read-only afterward, so concurrent reads are safe without locking. A
//! lookup miss is a plugin wiring defect and fails fast; calling code should
//! not catch and suppress it.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Algorithm, Language, Structure};
use crate::input::InputGeneratorFn;
use crate::reduce::{ArrayReducer, GraphReducer, TreeReducer, VisualReducer};
use crate::snippet::Snippet;
use crate::trace::Tracer;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tracer not found: {algorithm}:{language}")]
    TracerNotFound {
        algorithm: Algorithm,
        language: Language,
    },

    #[error("reducer not found for structure: {structure}")]
    ReducerNotFound { structure: Structure },

    #[error("snippet not found: {algorithm}:{language}")]
    SnippetNotFound {
        algorithm: Algorithm,
        language: Language,
    },

    #[error("input generator not found for algorithm: {algorithm}")]
    InputGeneratorNotFound { algorithm: Algorithm },
}

/// Algorithm tracers keyed by `(algorithm, language)`.
#[derive(Default)]
pub struct TracerRegistry {
    tracers: HashMap<(Algorithm, Language), Arc<dyn Tracer>>,
}

impl TracerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, algorithm: Algorithm, language: Language, tracer: Arc<dyn Tracer>) {
        self.tracers.insert((algorithm, language), tracer);
    }

    pub fn get(
        &self,
        algorithm: Algorithm,
        language: Language,
    ) -> Result<&dyn Tracer, RegistryError> {
        self.tracers
            .get(&(algorithm, language))
            .map(Arc::as_ref)
            .ok_or(RegistryError::TracerNotFound {
                algorithm,
                language,
            })
    }

    pub fn len(&self) -> usize {
        self.tracers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracers.is_empty()
    }
}

/// Visual reducers keyed by structure kind.
#[derive(Default)]
pub struct ReducerRegistry {
    reducers: HashMap<Structure, Box<dyn VisualReducer>>,
}

impl ReducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry wired with all built-in reducers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ArrayReducer));
        registry.register(Box::new(TreeReducer));
        registry.register(Box::new(GraphReducer));
        registry
    }

    pub fn register(&mut self, reducer: Box<dyn VisualReducer>) {
        self.reducers.insert(reducer.structure(), reducer);
    }

    pub fn get(&self, structure: Structure) -> Result<&dyn VisualReducer, RegistryError> {
        self.reducers
            .get(&structure)
            .map(Box::as_ref)
            .ok_or(RegistryError::ReducerNotFound { structure })
    }
}

/// Snippets keyed by `(algorithm, language)`.
///
/// Policy: a missing snippet is an error, not a placeholder string; the UI
/// surfaces it as a recoverable "snippet unavailable" state.
#[derive(Debug, Default)]
pub struct SnippetRegistry {
    snippets: HashMap<(Algorithm, Language), Snippet>,
}

impl SnippetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, snippet: Snippet) {
        self.snippets
            .insert((snippet.algorithm, snippet.language), snippet);
    }

    pub fn get(
        &self,
        algorithm: Algorithm,
        language: Language,
    ) -> Result<&Snippet, RegistryError> {
        self.snippets
            .get(&(algorithm, language))
            .ok_or(RegistryError::SnippetNotFound {
                algorithm,
                language,
            })
    }
}

/// Input generators keyed by algorithm.
#[derive(Default)]
pub struct InputRegistry {
    generators: HashMap<Algorithm, InputGeneratorFn>,
}

impl InputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, algorithm: Algorithm, generator: InputGeneratorFn) {
        self.generators.insert(algorithm, generator);
    }

    pub fn get(&self, algorithm: Algorithm) -> Result<InputGeneratorFn, RegistryError> {
        self.generators
            .get(&algorithm)
            .copied()
            .ok_or(RegistryError::InputGeneratorNotFound { algorithm })
    }
}
