use anyhow::{bail, Result};

use crate::publisher::SUPPORTED_LANGUAGES_CHANNEL;

#[derive(Debug, Clone)]
pub struct Config {
    // Conversion service
    pub codegen_url: String,
    pub codegen_timeout_secs: u64,

    // Notifications
    pub snippet_channel: String,

    // Telemetry
    pub telemetry_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let codegen_url = std::env::var("CODEGEN_URL")
            .unwrap_or_else(|_| "http://localhost:8787".to_string());
        if !codegen_url.starts_with("http://") && !codegen_url.starts_with("https://") {
            bail!("CODEGEN_URL must be an http(s) URL, got '{}'", codegen_url);
        }

        Ok(Self {
            codegen_url,
            codegen_timeout_secs: std::env::var("CODEGEN_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(30),

            snippet_channel: std::env::var("SNIPPET_CHANNEL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| SUPPORTED_LANGUAGES_CHANNEL.to_string()),

            telemetry_enabled: std::env::var("TELEMETRY_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
        })
    }
}

/// Anything but an explicit "off" value counts as enabled.
fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
