//! Request descriptions handed to generators and the base converter.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            disabled: false,
        }
    }
}

/// A form field of an `urlencoded` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormParam {
    pub key: String,
    pub value: String,
}

/// Request body, tagged by its `mode` like the desktop tool sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RequestBody {
    Raw { raw: String },
    Urlencoded { urlencoded: Vec<FormParam> },
}

impl RequestBody {
    pub fn raw(raw: impl Into<String>) -> Self {
        Self::Raw { raw: raw.into() }
    }
}

/// Fully formed description of an HTTP request, as supplied by the caller.
///
/// The core never mutates it; generators receive their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    /// A bodiless GET to `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
            header: Vec::new(),
            body: None,
        }
    }

    /// Load a request description from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse request file {}", path.display()))
    }

    /// Raw body text, if the body is in raw mode.
    pub fn raw_body(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Raw { raw }) => Some(raw.as_str()),
            _ => None,
        }
    }
}

/// Normalized request object passed to the base converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl From<&RequestOptions> for Request {
    fn from(options: &RequestOptions) -> Self {
        let method = options
            .method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("GET")
            .to_uppercase();

        Self {
            method,
            url: options.url.trim().to_string(),
            headers: options
                .header
                .iter()
                .filter(|h| !h.disabled)
                .cloned()
                .collect(),
            body: options.body.clone(),
        }
    }
}
