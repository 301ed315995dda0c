//! Top-level error type aggregating every engine failure domain.

use thiserror::Error;

use crate::input::InputError;
use crate::plugin::ManifestError;
use crate::reduce::ReduceError;
use crate::registry::RegistryError;
use crate::trace::TraceError;

/// Any error the engine can surface to a host application.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Input(#[from] InputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_pass_through_transparently() {
        let err = EngineError::from(TraceError::MissingRange {
            label: "outerLoop".into(),
        });
        assert_eq!(err.to_string(), "code range map is missing label `outerLoop`");
    }
}
