//! Dispatch metrics for snippet generation.
//!
//! Counts how generation requests were routed and how many failed.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-manager dispatch counters.
#[derive(Debug, Default)]
pub struct SnippetMetrics {
    /// Number of generate calls
    requests: AtomicUsize,

    /// Number of calls served by a custom generator
    custom_generations: AtomicUsize,

    /// Number of calls delegated to the base converter
    fallback_conversions: AtomicUsize,

    /// Number of calls that failed, whichever path served them
    failures: AtomicUsize,
}

impl SnippetMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_custom(&self) {
        self.custom_generations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback_conversions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn custom_generations(&self) -> usize {
        self.custom_generations.load(Ordering::Relaxed)
    }

    pub fn fallback_conversions(&self) -> usize {
        self.fallback_conversions.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let failures = self.failures();
        let success_rate = if requests > 0 {
            (requests.saturating_sub(failures) as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            custom_generations: self.custom_generations(),
            fallback_conversions: self.fallback_conversions(),
            failures,
            success_rate,
        }
    }
}

/// Point-in-time view of [`SnippetMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub custom_generations: usize,
    pub fallback_conversions: usize,
    pub failures: usize,

    /// Success rate as a percentage (0-100)
    pub success_rate: f64,
}
