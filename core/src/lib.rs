//! Trace-and-replay engine for interactive algorithm visualization.
//!
//! The engine separates *what an algorithm did* from *what it looks like*:
//!
//! - **Tracers** run an algorithm over a typed input and emit an ordered
//!   sequence of [`step::Step`]s, each pairing a code-highlight range with
//!   semantic visual [`operation::Operation`]s.
//! - **Reducers** replay a prefix of those operations over the initial
//!   structure to reconstruct the exact visual state at any timeline index,
//!   so scrubbing backward and forward is free of hidden state.
//!
//! Algorithms plug in through [`plugin::PluginManifest`]s that bundle a
//! tracer, per-language code snippets with labeled line ranges, and an input
//! generator. [`plugin::EngineContext::bootstrap`] wires everything into
//! registries, and [`runner::Runner`] is the facade a host application talks
//! to. [`playback::Playback`] provides the clock-free timeline state machine.

pub mod catalog;
pub mod data_structures;
pub mod error;
pub mod input;
pub mod operation;
pub mod playback;
pub mod plugin;
pub mod reduce;
pub mod registry;
pub mod runner;
pub mod snippet;
pub mod step;
pub mod trace;

pub use catalog::{Algorithm, Language, Structure};
pub use error::EngineError;
pub use input::{InputError, InputOptions};
pub use operation::Operation;
pub use playback::Playback;
pub use plugin::{EngineContext, ManifestError, PluginManifest};
pub use reduce::{ReduceError, VisualReducer, VisualState};
pub use registry::RegistryError;
pub use runner::{Runner, TraceOutput};
pub use snippet::{CodeRangeMap, Snippet};
pub use step::{LineRange, Step, StepBuilder};
pub use trace::{AlgorithmInput, TraceError, Tracer};
