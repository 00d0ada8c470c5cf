//! Usage telemetry collaborators.

use std::collections::HashMap;
use tracing::info;

/// Fire-and-forget usage logger.
///
/// Implementations must not block; nothing they do is visible to callers of
/// snippet generation.
pub trait TelemetryLogger: Send + Sync {
    fn log_usage(&self, event: &str, data: &HashMap<String, String>);
}

/// Emits usage events as `tracing` records on the `telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetryLogger for TracingTelemetry {
    fn log_usage(&self, event: &str, data: &HashMap<String, String>) {
        let mut pairs: Vec<_> = data.iter().collect();
        pairs.sort();
        let attributes = pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        info!(target: "telemetry", event = %event, "{}", attributes);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetryLogger for NoopTelemetry {
    fn log_usage(&self, _event: &str, _data: &HashMap<String, String>) {}
}
