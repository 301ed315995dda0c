//! Plugin packaging: manifests bundling a tracer, snippets, and an input
//! generator per algorithm, plus the loader that wires them into registries.
//!
//! Built-in algorithms register through the same manifest path an external
//! plugin would use, so there is exactly one wiring mechanism to keep
//! correct. Loading validates every manifest before registration and fails
//! fast on an inconsistent one.

use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::catalog::{Algorithm, Language, Structure};
use crate::input::InputGeneratorFn;
use crate::registry::{InputRegistry, ReducerRegistry, SnippetRegistry, TracerRegistry};
use crate::snippet::{CodeRangeMap, Snippet};
use crate::trace::Tracer;

pub mod bst_delete;
pub mod bst_insert;
pub mod bst_search;
pub mod bubble_sort;
pub mod graph_bfs;
pub mod selection_sort;

/// Snippet text plus the labeled line ranges a tracer highlights in it.
#[derive(Debug, Clone)]
pub struct SnippetSource {
    pub language: Language,
    pub code: &'static str,
    pub ranges: CodeRangeMap,
}

/// Everything one algorithm contributes to the engine.
///
/// Tracers are language-agnostic (ranges are injected at trace time), so the
/// factory takes no language and the loader registers the same tracer under
/// every declared language.
pub struct PluginManifest {
    pub algorithm: Algorithm,
    pub structure: Structure,
    pub languages: Vec<Language>,
    pub make_tracer: fn() -> Arc<dyn Tracer>,
    pub snippets: Vec<SnippetSource>,
    pub input_generator: InputGeneratorFn,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest for {algorithm} declares no languages")]
    NoLanguages { algorithm: Algorithm },

    #[error("manifest for {algorithm} declares {language} but ships no snippet for it")]
    MissingSnippet {
        algorithm: Algorithm,
        language: Language,
    },

    #[error("manifest for {algorithm} ships a snippet for undeclared language {language}")]
    UndeclaredSnippet {
        algorithm: Algorithm,
        language: Language,
    },

    #[error("tracer for {algorithm} reports structure {actual}, manifest says {declared}")]
    StructureMismatch {
        algorithm: Algorithm,
        declared: Structure,
        actual: Structure,
    },
}

impl PluginManifest {
    /// Checks internal consistency: at least one language, a snippet for
    /// every declared language and no stray ones, and a tracer that agrees
    /// with the declared structure.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.languages.is_empty() {
            return Err(ManifestError::NoLanguages {
                algorithm: self.algorithm,
            });
        }
        for language in &self.languages {
            if !self.snippets.iter().any(|s| s.language == *language) {
                return Err(ManifestError::MissingSnippet {
                    algorithm: self.algorithm,
                    language: *language,
                });
            }
        }
        for snippet in &self.snippets {
            if !self.languages.contains(&snippet.language) {
                return Err(ManifestError::UndeclaredSnippet {
                    algorithm: self.algorithm,
                    language: snippet.language,
                });
            }
        }
        let tracer = (self.make_tracer)();
        if tracer.structure() != self.structure {
            return Err(ManifestError::StructureMismatch {
                algorithm: self.algorithm,
                declared: self.structure,
                actual: tracer.structure(),
            });
        }
        Ok(())
    }
}

/// All built-in plugin manifests. This is the single registration point; a
/// new algorithm is added by appending its manifest here.
pub fn manifests() -> Vec<PluginManifest> {
    vec![
        bubble_sort::manifest(),
        selection_sort::manifest(),
        bst_search::manifest(),
        bst_insert::manifest(),
        bst_delete::manifest(),
        graph_bfs::manifest(),
    ]
}

/// Fully wired engine registries. Constructed once at startup and handed to
/// the runner explicitly; the engine keeps no global state.
pub struct EngineContext {
    pub tracers: TracerRegistry,
    pub reducers: ReducerRegistry,
    pub snippets: SnippetRegistry,
    pub inputs: InputRegistry,
}

impl EngineContext {
    /// Validates and loads every built-in manifest.
    pub fn bootstrap() -> Result<Self, ManifestError> {
        Self::from_manifests(manifests())
    }

    pub fn from_manifests(manifests: Vec<PluginManifest>) -> Result<Self, ManifestError> {
        let mut context = Self {
            tracers: TracerRegistry::new(),
            reducers: ReducerRegistry::with_builtins(),
            snippets: SnippetRegistry::new(),
            inputs: InputRegistry::new(),
        };
        for manifest in manifests {
            manifest.validate()?;
            context.load(manifest);
        }
        Ok(context)
    }

    fn load(&mut self, manifest: PluginManifest) {
        let tracer = (manifest.make_tracer)();
        for language in &manifest.languages {
            self.tracers
                .register(manifest.algorithm, *language, Arc::clone(&tracer));
        }
        for source in manifest.snippets {
            self.snippets.register(Snippet {
                algorithm: manifest.algorithm,
                language: source.language,
                text: source.code.to_string(),
                ranges: source.ranges,
            });
        }
        self.inputs
            .register(manifest.algorithm, manifest.input_generator);
        info!(
            "loaded plugin {} ({} languages)",
            manifest.algorithm,
            manifest.languages.len()
        );
    }
}
