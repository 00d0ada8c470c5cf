//! HTTP implementation of the base conversion backend.
//!
//! Talks to a conversion service exposing:
//! - `GET  {base}/languages` returning `[Language]`
//! - `POST {base}/convert` taking `{language, variant, request, options}` and
//!   returning `{"snippet": string | null}`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::backend::{CodegenBackend, ConvertCallback, ConvertOptions};
use crate::config::Config;
use crate::languages::Language;
use crate::request::Request;
use crate::retry::{with_retry_if, RetryConfig};

/// Failure talking to the conversion service.
#[derive(Debug, Error)]
pub enum CodegenClientError {
    #[error("request to conversion service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("conversion service error ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

impl CodegenClientError {
    /// Transport failures and 5xx responses are worth retrying.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    language: &'a str,
    variant: &'a str,
    request: &'a Request,
    options: &'a ConvertOptions,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    snippet: Option<String>,
}

/// Conversion backend reached over HTTP.
#[derive(Clone)]
pub struct CodegenClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl CodegenClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                retry: RetryConfig::api_call(),
            }),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.codegen_url.clone(),
            Duration::from_secs(config.codegen_timeout_secs),
        )
    }

    /// Replace the retry policy used for catalog fetches.
    pub fn with_retry(self, retry: RetryConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                retry,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    async fn fetch_languages(&self) -> Result<Vec<Language>, CodegenClientError> {
        let url = format!("{}/languages", self.inner.base_url);
        let response = self.inner.http.get(&url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

impl Inner {
    async fn convert(
        &self,
        language: &str,
        variant: &str,
        request: &Request,
        options: &ConvertOptions,
    ) -> Result<Option<String>, CodegenClientError> {
        let url = format!("{}/convert", self.base_url);
        let body = ConvertRequest {
            language,
            variant,
            request,
            options,
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let response = ensure_success(response).await?;
        let parsed: ConvertResponse = response.json().await?;
        Ok(parsed.snippet)
    }
}

async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, CodegenClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(CodegenClientError::Status { status, body })
}

impl CodegenBackend for CodegenClient {
    fn language_list(&self) -> BoxFuture<'_, anyhow::Result<Vec<Language>>> {
        Box::pin(async move {
            let languages = with_retry_if(
                &self.inner.retry,
                "Fetch language catalog",
                || self.fetch_languages(),
                CodegenClientError::is_retryable,
            )
            .await
            .with_context(|| format!("Failed to fetch languages from {}", self.inner.base_url))?;

            info!("Fetched {} languages from conversion service", languages.len());
            Ok(languages)
        })
    }

    fn convert(
        &self,
        language: &str,
        variant: &str,
        request: Request,
        options: ConvertOptions,
        callback: ConvertCallback,
    ) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                callback(Some(anyhow::Error::new(e).context("No async runtime for conversion")), None);
                return;
            }
        };

        let inner = Arc::clone(&self.inner);
        let (language, variant) = (language.to_string(), variant.to_string());
        handle.spawn(async move {
            debug!("Converting {}/{} via {}", language, variant, inner.base_url);
            match inner.convert(&language, &variant, &request, &options).await {
                Ok(snippet) => callback(None, snippet),
                Err(e) => callback(Some(e.into()), None),
            }
        });
    }
}
