//! Snippet manager: owns the language registry and dispatches generation.
//!
//! Lifecycle:
//! 1. `init` loads the base catalog, applies the built-in custom variants and
//!    publishes the list once
//! 2. `generate` serves requests, preferring custom generators over the backend
//! 3. `dispose` drops the list and every generator

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{convert_once, CodegenBackend, ConvertOptions};
use crate::error::{Result, SnippetError};
use crate::generators::{builtin_variants, SnippetGenerator};
use crate::languages::{Language, LanguageRegistry, MetricsReport, Registration, SnippetMetrics};
use crate::publisher::Publisher;
use crate::request::{Request, RequestOptions};
use crate::telemetry::TelemetryLogger;

/// Telemetry event recorded for every generate call.
pub const GENERATE_EVENT: &str = "snippet.generate";

pub struct SnippetManager {
    registry: LanguageRegistry,
    backend: Arc<dyn CodegenBackend>,
    telemetry: Arc<dyn TelemetryLogger>,
    publisher: Publisher,
    metrics: SnippetMetrics,
}

impl SnippetManager {
    pub fn new(
        backend: Arc<dyn CodegenBackend>,
        telemetry: Arc<dyn TelemetryLogger>,
        publisher: Publisher,
    ) -> Self {
        Self {
            registry: LanguageRegistry::new(),
            backend,
            telemetry,
            publisher,
            metrics: SnippetMetrics::new(),
        }
    }

    /// Load the base catalog, register the built-in variants and notify subscribers.
    ///
    /// Replaces any previous list and drops previously registered generators.
    /// If the catalog cannot be fetched the current state is left untouched.
    pub async fn init(&self) -> Result<()> {
        let languages = self
            .backend
            .language_list()
            .await
            .map_err(SnippetError::Catalog)?;
        info!("Loaded {} languages from base catalog", languages.len());

        let outcomes = self.registry.rebuild(languages, builtin_variants());
        for (key, outcome) in outcomes {
            if outcome == Registration::UnknownLanguage {
                warn!(
                    "Base catalog has no '{}' language; {} is only reachable through generate",
                    key.language, key
                );
            }
        }

        self.notify();
        Ok(())
    }

    /// Register a custom generator for `language/variant`.
    ///
    /// Unknown languages are left out of the list, but the generator is still
    /// mapped. Re-registering replaces the generator and leaves the list as is.
    /// Subscribers are not notified; call [`SnippetManager::notify`] after a batch.
    pub fn add_variant<G>(&self, language: &str, variant: &str, generator: G) -> Registration
    where
        G: SnippetGenerator + 'static,
    {
        self.registry
            .register_variant(language, variant, Arc::new(generator))
    }

    /// Current supported languages.
    pub fn get_language_list(&self) -> Vec<Language> {
        self.registry.languages()
    }

    /// Push the current list to subscribers.
    pub fn notify(&self) {
        self.publisher.publish(&self.registry.languages());
    }

    /// Generate a snippet for `options` in `language/variant`.
    ///
    /// Custom generators win; otherwise the base backend converts the request
    /// with an empty options bag. Failures are returned as-is, never retried.
    pub async fn generate(
        &self,
        options: &RequestOptions,
        language: &str,
        variant: &str,
    ) -> Result<String> {
        self.log_usage(language, variant);
        self.metrics.record_request();

        let result = match self.registry.generator(language, variant) {
            Some(generator) => {
                debug!("Using custom generator for {}/{}", language, variant);
                self.metrics.record_custom();
                generator
                    .generate(options.clone())
                    .await
                    .map_err(SnippetError::Generator)
            }
            None => {
                debug!("Falling back to base converter for {}/{}", language, variant);
                self.metrics.record_fallback();
                convert_once(
                    self.backend.as_ref(),
                    language,
                    variant,
                    Request::from(options),
                    ConvertOptions::default(),
                )
                .await
            }
        };

        if let Err(e) = &result {
            self.metrics.record_failure();
            warn!("Snippet generation failed for {}/{}: {}", language, variant, e);
        }
        result
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    /// Drop the list and every custom generator.
    pub fn dispose(&self) {
        self.registry.clear();
        info!("Snippet manager disposed");
    }

    fn log_usage(&self, language: &str, variant: &str) {
        let data = HashMap::from([
            ("language".to_string(), language.to_string()),
            ("variant".to_string(), variant.to_string()),
        ]);
        let logged = catch_unwind(AssertUnwindSafe(|| {
            self.telemetry.log_usage(GENERATE_EVENT, &data)
        }));
        if logged.is_err() {
            warn!("Telemetry logger panicked; continuing");
        }
    }
}
