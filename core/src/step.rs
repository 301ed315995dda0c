//! Steps, line ranges, and the append-only step builder.
//!
//! A step is one unit of a trace: a code-highlight range, an optional
//! human-readable note, and zero or more visual operations. Steps are
//! produced once per tracer invocation and are immutable afterward; the
//! timeline and replay consume them read-only.

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// 1-based, inclusive source line range. `line_end` defaults to `line_start`
/// (a single highlighted line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    pub line_start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
}

impl LineRange {
    /// A single highlighted line.
    pub fn line(line: u32) -> Self {
        Self {
            line_start: line,
            line_end: None,
        }
    }

    /// An inclusive span of lines.
    pub fn span(line_start: u32, line_end: u32) -> Self {
        Self {
            line_start,
            line_end: Some(line_end),
        }
    }

    /// The effective last highlighted line.
    pub fn end(&self) -> u32 {
        self.line_end.unwrap_or(self.line_start)
    }
}

/// One unit of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(flatten)]
    pub range: LineRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,
}

impl Step {
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

/// Append-only builder accumulating steps in execution order.
///
/// Used exclusively by tracers. Performs no validation beyond shape; a tracer
/// is responsible for emitting well-formed operations.
#[derive(Debug, Default)]
pub struct StepBuilder {
    steps: Vec<Step>,
}

impl StepBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step with no operations (informational highlight).
    pub fn add(&mut self, range: LineRange, note: impl Into<String>) -> &mut Self {
        self.push(range, note, Vec::new())
    }

    /// Appends a step carrying visual operations.
    pub fn add_ops(
        &mut self,
        range: LineRange,
        note: impl Into<String>,
        operations: Vec<Operation>,
    ) -> &mut Self {
        self.push(range, note, operations)
    }

    fn push(&mut self, range: LineRange, note: impl Into<String>, operations: Vec<Operation>) -> &mut Self {
        self.steps.push(Step {
            range,
            note: Some(note.into()),
            operations,
        });
        self
    }

    /// Returns the accumulated, ordered step sequence.
    pub fn build(self) -> Vec<Step> {
        self.steps
    }
}
