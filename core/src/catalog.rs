//! Canonical identifiers for algorithms, source languages, and structure kinds.
//!
//! Every registry in the engine is keyed by values from this module, so the
//! identifier enums are the single source of truth for what the engine can
//! name. Adding an algorithm or language starts here; the compiler then walks
//! the rest of the wiring through exhaustive matches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical algorithm identifiers. Extend as new algorithms are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    BstSearch,
    BstInsert,
    BstDelete,
    GraphBfs,
}

impl Algorithm {
    /// Stable string id (e.g. `"bubble-sort"`), used in keys and messages.
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble-sort",
            Algorithm::SelectionSort => "selection-sort",
            Algorithm::BstSearch => "bst-search",
            Algorithm::BstInsert => "bst-insert",
            Algorithm::BstDelete => "bst-delete",
            Algorithm::GraphBfs => "graph-bfs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Source languages a snippet may be rendered in.
///
/// The engine never interprets snippet text; the language only selects which
/// snippet and code-range map a tracer is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    C,
    Rust,
    TypeScript,
}

impl Language {
    /// All supported languages, in catalog order.
    pub const ALL: [Language; 5] = [
        Language::Java,
        Language::Python,
        Language::C,
        Language::Rust,
        Language::TypeScript,
    ];

    /// Default language for fresh UI sessions.
    pub const DEFAULT: Language = Language::TypeScript;

    /// Stable lowercase id (e.g. `"typescript"`).
    pub fn id(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::C => "c",
            Language::Rust => "rust",
            Language::TypeScript => "typescript",
        }
    }

    /// Human-readable display name.
    pub fn label(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Python => "Python",
            Language::C => "C",
            Language::Rust => "Rust",
            Language::TypeScript => "TypeScript",
        }
    }

    /// Parses a stable id back into a language, if valid.
    pub fn parse(value: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.id() == value)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Data-structure category that selects which visual reducer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Structure {
    Array,
    Bst,
    Graph,
}

impl Structure {
    pub fn id(self) -> &'static str {
        match self {
            Structure::Array => "array",
            Structure::Bst => "bst",
            Structure::Graph => "graph",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_ids_are_stable() {
        assert_eq!(Algorithm::BubbleSort.id(), "bubble-sort");
        assert_eq!(Algorithm::GraphBfs.to_string(), "graph-bfs");
    }

    #[test]
    fn language_parse_round_trips() {
        for language in Language::ALL {
            assert_eq!(Language::parse(language.id()), Some(language));
        }
        assert_eq!(Language::parse("cobol"), None);
    }

    #[test]
    fn default_language_is_in_catalog() {
        assert!(Language::ALL.contains(&Language::DEFAULT));
    }

    #[test]
    fn serde_uses_stable_ids() {
        let json = serde_json::to_string(&Algorithm::BstSearch).unwrap();
        assert_eq!(json, "\"bst-search\"");
        let json = serde_json::to_string(&Structure::Bst).unwrap();
        assert_eq!(json, "\"bst\"");
    }
}
