//! Language and variant records shared with subscribers.
//!
//! These are the payload types pushed on the language channel, so their
//! serialized shape (`key` plus an ordered `variants` list) is part of the
//! contract with observers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A generation style within a language (usually a specific HTTP client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Identifier, unique within the parent language (case-sensitive)
    pub key: String,
}

impl Variant {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// A target language with its ordered variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Identifier, unique within the registry
    pub key: String,

    /// Human readable name from the base catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Editor syntax mode from the base catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_mode: Option<String>,

    /// Variants in display order
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Language {
    /// Create a language with the given variant keys and no display metadata.
    pub fn new<I, S>(key: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            label: None,
            syntax_mode: None,
            variants: variants.into_iter().map(Variant::new).collect(),
        }
    }

    /// Find a variant by exact key.
    pub fn variant(&self, key: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.key == key)
    }

    pub fn has_variant(&self, key: &str) -> bool {
        self.variant(key).is_some()
    }
}

/// Composite key of the generator table.
///
/// Equality and hashing are structural over both parts, so `("a/b", "c")`
/// and `("a", "b/c")` are different keys even though they display alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneratorKey {
    pub language: String,
    pub variant: String,
}

impl GeneratorKey {
    pub fn new(language: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for GeneratorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.variant)
    }
}
