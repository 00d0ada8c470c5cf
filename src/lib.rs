//! Snippet Studio - generate code snippets reproducing an HTTP request.
//!
//! [`SnippetManager`] merges the base converter's language catalog with
//! custom generators, routes each generation request to the right one and
//! publishes the supported language list to subscribers.

pub mod backend;
pub mod cli;
pub mod codegen_client;
pub mod config;
pub mod error;
pub mod generators;
pub mod languages;
pub mod manager;
pub mod publisher;
pub mod request;
pub mod retry;
pub mod telemetry;

pub use backend::{convert_once, CodegenBackend, ConvertCallback, ConvertOptions};
pub use codegen_client::{CodegenClient, CodegenClientError};
pub use error::{Result, SnippetError};
pub use generators::{GeneratorRef, SnippetGenerator};
pub use languages::{GeneratorKey, Language, LanguageRegistry, MetricsReport, Registration, Variant};
pub use manager::SnippetManager;
pub use publisher::{ChannelNotifier, Notification, Notifier, Publisher};
pub use request::{Header, Request, RequestBody, RequestOptions};
pub use telemetry::{NoopTelemetry, TelemetryLogger, TracingTelemetry};
