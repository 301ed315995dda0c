//! Code snippets and their semantic code-range maps.
//!
//! A snippet is the opaque source text shown for one (algorithm, language)
//! pair, plus a map from semantic labels (`outerLoop`, `swapBlock`, ...) to
//! line ranges. Tracers consume the range map instead of computing line
//! numbers, which decouples trace logic from any particular snippet layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Algorithm, Language};
use crate::step::LineRange;
use crate::trace::TraceError;

/// Semantic label -> line range, one map per (algorithm, language) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeRangeMap {
    ranges: BTreeMap<String, LineRange>,
}

impl CodeRangeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, LineRange)]) -> Self {
        let mut map = Self::new();
        for (label, range) in pairs {
            map.insert(label, *range);
        }
        map
    }

    pub fn insert(&mut self, label: &str, range: LineRange) {
        self.ranges.insert(label.to_owned(), range);
    }

    pub fn get(&self, label: &str) -> Option<LineRange> {
        self.ranges.get(label).copied()
    }

    /// Resolves a label a tracer depends on. A missing label is a plugin
    /// wiring defect and fails fast.
    pub fn require(&self, label: &str) -> Result<LineRange, TraceError> {
        self.get(label).ok_or_else(|| TraceError::MissingRange {
            label: label.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Source text plus range map for one (algorithm, language) pair. The engine
/// never interprets `text`; presentation layers highlight it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub algorithm: Algorithm,
    pub language: Language,
    pub text: String,
    pub ranges: CodeRangeMap,
}

impl Snippet {
    pub fn new(
        algorithm: Algorithm,
        language: Language,
        text: impl Into<String>,
        ranges: CodeRangeMap,
    ) -> Self {
        Self {
            algorithm,
            language,
            text: text.into(),
            ranges,
        }
    }
}
