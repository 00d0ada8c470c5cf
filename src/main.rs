//! Snippet Studio command line
//!
//! Usage:
//!   snippet-studio languages                                   # Print supported languages as JSON
//!   snippet-studio generate <language> <variant> <request.json> # Print a snippet
//!
//! Optional environment variables:
//! - CODEGEN_URL (defaults to http://localhost:8787)
//! - CODEGEN_TIMEOUT_SECS (defaults to 30)
//! - SNIPPET_CHANNEL (defaults to supported-languages-update)
//! - TELEMETRY_ENABLED (defaults to true)

use std::sync::Arc;

use anyhow::{Context, Result};
use snippet_studio::{
    cli::{self, Command},
    config::Config,
    ChannelNotifier, CodegenClient, NoopTelemetry, Publisher, SnippetManager, TelemetryLogger,
    TracingTelemetry,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snippet_studio=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let config = Config::from_env()?;

    let telemetry: Arc<dyn TelemetryLogger> = if config.telemetry_enabled {
        Arc::new(TracingTelemetry)
    } else {
        Arc::new(NoopTelemetry)
    };
    let publisher = Publisher::new(Arc::new(ChannelNotifier::default()), &config.snippet_channel);
    let backend = Arc::new(CodegenClient::from_config(&config)?);

    let manager = SnippetManager::new(backend, telemetry, publisher);
    info!("Loading language catalog from {}", config.codegen_url);
    manager
        .init()
        .await
        .context("Failed to initialize snippet manager")?;

    let result = cli::run(&manager, &command).await;
    manager.dispose();
    println!("{}", result?);
    Ok(())
}
