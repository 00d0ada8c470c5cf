//! Supported languages and the custom generator table.
//!
//! # Architecture
//!
//! - `language`: payload records (`Language`, `Variant`) and the structural `GeneratorKey`
//! - `registry`: owned list + generator table with registration semantics
//! - `metrics`: dispatch counters

mod language;
mod metrics;
mod registry;

pub use language::{GeneratorKey, Language, Variant};
pub use metrics::{MetricsReport, SnippetMetrics};
pub use registry::{LanguageRegistry, Registration};
