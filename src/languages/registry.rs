//! Language registry: the supported language list plus the custom generator table.
//!
//! The list is what subscribers see; the generator table is what dispatch
//! consults. They are updated together by [`LanguageRegistry::register_variant`]
//! but are deliberately independent: a generator can be registered for a
//! language the list does not contain.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use super::language::{GeneratorKey, Language, Variant};
use crate::generators::{BuiltinVariant, GeneratorRef};

/// What a registration did to the visible list.
///
/// The generator table is updated in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new variant was appended to the language
    Added,
    /// The language already had a variant with this key
    AlreadyPresent,
    /// The language is not in the list
    UnknownLanguage,
}

#[derive(Default)]
struct RegistryState {
    languages: Vec<Language>,
    generators: HashMap<GeneratorKey, GeneratorRef>,
}

impl RegistryState {
    fn with_languages(languages: Vec<Language>) -> Self {
        Self {
            languages: unique_languages(languages),
            generators: HashMap::new(),
        }
    }

    fn register(&mut self, language: &str, variant: &str, generator: GeneratorRef) -> Registration {
        let outcome = match self.languages.iter_mut().find(|l| l.key == language) {
            None => Registration::UnknownLanguage,
            Some(lang) if lang.has_variant(variant) => Registration::AlreadyPresent,
            Some(lang) => {
                lang.variants.push(Variant::new(variant));
                Registration::Added
            }
        };

        let key = GeneratorKey::new(language, variant);
        debug!("Registered generator {} ({:?})", key, outcome);
        self.generators.insert(key, generator);

        outcome
    }
}

/// Keep the first occurrence of each language key.
fn unique_languages(languages: Vec<Language>) -> Vec<Language> {
    let mut seen = HashSet::new();
    languages
        .into_iter()
        .filter(|language| {
            let first = seen.insert(language.key.clone());
            if !first {
                warn!("Dropping duplicate language '{}' from catalog", language.key);
            }
            first
        })
        .collect()
}

/// Owned registry of languages and custom generators.
///
/// State sits behind a read-write lock so registration and concurrent
/// generation can share one instance across tasks. Guards are never held
/// across an `.await`.
#[derive(Default)]
pub struct LanguageRegistry {
    state: RwLock<RegistryState>,
}

impl LanguageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `languages` as the current list, dropping every custom generator.
    ///
    /// Later entries reusing a language key are dropped.
    pub fn install(&self, languages: Vec<Language>) {
        self.rebuild(languages, Vec::new());
    }

    /// Replace the whole state with `languages` plus `builtins`, in one swap.
    ///
    /// The new list and generator table are built before the lock is taken, so
    /// readers see either the previous state or the complete new one.
    /// Returns each built-in's key with its registration outcome, in order.
    pub fn rebuild(
        &self,
        languages: Vec<Language>,
        builtins: Vec<BuiltinVariant>,
    ) -> Vec<(GeneratorKey, Registration)> {
        let mut next = RegistryState::with_languages(languages);
        let outcomes = builtins
            .into_iter()
            .map(|builtin| {
                let outcome = next.register(builtin.language, builtin.variant, builtin.generator);
                (GeneratorKey::new(builtin.language, builtin.variant), outcome)
            })
            .collect();

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
        outcomes
    }

    /// Register `generator` for `language/variant`.
    ///
    /// # Returns
    /// * `Registration::Added` if the variant was appended to the language
    /// * `Registration::AlreadyPresent` if the language already had it
    /// * `Registration::UnknownLanguage` if the language is not listed
    ///
    /// The generator table entry is set or overwritten in all three cases.
    pub fn register_variant(
        &self,
        language: &str,
        variant: &str,
        generator: GeneratorRef,
    ) -> Registration {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(language, variant, generator)
    }

    /// Snapshot of the current list.
    pub fn languages(&self) -> Vec<Language> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .languages
            .clone()
    }

    /// Custom generator registered for `language/variant`, if any.
    pub fn generator(&self, language: &str, variant: &str) -> Option<GeneratorRef> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generators
            .get(&GeneratorKey::new(language, variant))
            .cloned()
    }

    /// Number of custom generators.
    pub fn generator_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generators
            .len()
    }

    /// Drop the list and all generators.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.languages.clear();
        state.generators.clear();
    }
}
