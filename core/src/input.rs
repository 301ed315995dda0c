//! Random input generation for algorithm runs.
//!
//! Each plugin contributes a generator function; the engine drives it with a
//! caller-supplied RNG so runs are reproducible from a seed. Options only
//! constrain generators that sample scalar values (array sizes and ranges);
//! structural generators are free to ignore fields that do not apply.

use rand::Rng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trace::AlgorithmInput;

/// Tuning knobs for input generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputOptions {
    /// Number of elements for array-shaped inputs.
    pub size: usize,
    /// Inclusive lower bound for sampled values.
    pub min: i64,
    /// Inclusive upper bound for sampled values.
    pub max: i64,
    /// Require all sampled values to be distinct.
    pub unique: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            size: 8,
            min: 1,
            max: 99,
            unique: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid value range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("cannot sample {requested} unique values from range {min}..={max}")]
    RangeTooNarrow {
        requested: usize,
        min: i64,
        max: i64,
    },
}

/// Plugin-supplied input generator. Plain function pointer so registries can
/// copy it freely.
pub type InputGeneratorFn =
    fn(rng: &mut dyn RngCore, options: &InputOptions) -> Result<AlgorithmInput, InputError>;

pub(crate) fn check_range(options: &InputOptions) -> Result<(), InputError> {
    if options.min > options.max {
        return Err(InputError::InvalidRange {
            min: options.min,
            max: options.max,
        });
    }
    Ok(())
}

/// Samples `count` values in `min..=max`, all distinct.
pub(crate) fn sample_unique_values(
    rng: &mut dyn RngCore,
    count: usize,
    min: i64,
    max: i64,
) -> Result<Vec<i64>, InputError> {
    // i128 so the span of extreme i64 ranges cannot overflow.
    let span = i128::from(max) - i128::from(min) + 1;
    if span < count as i128 {
        return Err(InputError::RangeTooNarrow {
            requested: count,
            min,
            max,
        });
    }
    let mut values = Vec::with_capacity(count);
    while values.len() < count {
        let value = rng.gen_range(min..=max);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}
