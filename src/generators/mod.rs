//! Custom snippet generators.
//!
//! A generator turns a [`RequestOptions`] into snippet text. Any async
//! function or closure of shape `Fn(RequestOptions) -> Future<Output =
//! anyhow::Result<String>>` is a generator, so the built-ins below are plain
//! `async fn`s.

mod java_okhttp;
mod python_langchain;
mod quarkus;

pub use java_okhttp::java_okhttp_generator;
pub use python_langchain::python_langchain_generator;
pub use quarkus::quarkus_langchain4j_generator;

use crate::request::RequestOptions;
use futures::future::BoxFuture;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;

/// Executable unit producing snippet text from a request description.
pub trait SnippetGenerator: Send + Sync {
    fn generate(&self, options: RequestOptions) -> BoxFuture<'static, anyhow::Result<String>>;
}

impl<F, Fut> SnippetGenerator for F
where
    F: Fn(RequestOptions) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
{
    fn generate(&self, options: RequestOptions) -> BoxFuture<'static, anyhow::Result<String>> {
        Box::pin(self(options))
    }
}

/// Shared handle stored in the generator table.
pub type GeneratorRef = Arc<dyn SnippetGenerator>;

/// One built-in registration applied at startup.
pub struct BuiltinVariant {
    pub language: &'static str,
    pub variant: &'static str,
    pub generator: GeneratorRef,
}

/// Built-in custom variants, in registration order.
pub fn builtin_variants() -> Vec<BuiltinVariant> {
    vec![
        BuiltinVariant {
            language: "java",
            variant: "Quarkus Langchain4J",
            generator: Arc::new(quarkus_langchain4j_generator),
        },
        BuiltinVariant {
            language: "java",
            variant: "OkHttp",
            generator: Arc::new(java_okhttp_generator),
        },
        BuiltinVariant {
            language: "python",
            variant: "Python LangChain",
            generator: Arc::new(python_langchain_generator),
        },
    ]
}

const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";
const DEFAULT_PROMPT: &str = "What is the capital of France?";

/// Base URL of an OpenAI-compatible endpoint: the request URL without a
/// trailing `/chat/completions`.
pub(crate) fn base_url(options: &RequestOptions) -> String {
    let url = options.url.trim().trim_end_matches('/');
    url.strip_suffix(CHAT_COMPLETIONS_SUFFIX)
        .unwrap_or(url)
        .to_string()
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: String,
}

/// Last user message of an OpenAI-style chat body, or a fixed question.
pub(crate) fn user_prompt(options: &RequestOptions) -> String {
    options
        .raw_body()
        .and_then(|raw| serde_json::from_str::<ChatBody>(raw).ok())
        .and_then(|body| {
            body.messages
                .into_iter()
                .rev()
                .find(|m| m.role == "user" && !m.content.is_empty())
        })
        .map(|m| m.content)
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string())
}

/// Escape text for a double-quoted Java or Python string literal.
pub(crate) fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBody;

    fn chat_request(body: &str) -> RequestOptions {
        RequestOptions {
            url: "http://localhost:35000/v1/chat/completions".to_string(),
            method: Some("POST".to_string()),
            header: Vec::new(),
            body: Some(RequestBody::raw(body)),
        }
    }

    #[test]
    fn test_base_url_strips_chat_completions() {
        let options = chat_request("{}");
        assert_eq!(base_url(&options), "http://localhost:35000/v1");
    }

    #[test]
    fn test_base_url_keeps_other_paths() {
        let options = RequestOptions::get("http://localhost:35000/v1/");
        assert_eq!(base_url(&options), "http://localhost:35000/v1");
    }

    #[test]
    fn test_user_prompt_takes_last_user_message() {
        let options = chat_request(
            r#"{"messages":[
                {"role":"system","content":"be brief"},
                {"role":"user","content":"first"},
                {"role":"assistant","content":"ok"},
                {"role":"user","content":"second"}
            ]}"#,
        );
        assert_eq!(user_prompt(&options), "second");
    }

    #[test]
    fn test_user_prompt_falls_back() {
        assert_eq!(user_prompt(&chat_request("not json")), DEFAULT_PROMPT);
        assert_eq!(
            user_prompt(&RequestOptions::get("http://localhost")),
            DEFAULT_PROMPT
        );
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(r#"say "hi"\n"#), r#"say \"hi\"\\n"#);
        assert_eq!(escape_literal("a\nb"), "a\\nb");
    }

    #[test]
    fn test_builtin_variants_order() {
        let keys: Vec<_> = builtin_variants()
            .iter()
            .map(|b| format!("{}/{}", b.language, b.variant))
            .collect();
        assert_eq!(
            keys,
            vec![
                "java/Quarkus Langchain4J",
                "java/OkHttp",
                "python/Python LangChain"
            ]
        );
    }

    #[tokio::test]
    async fn test_closure_is_a_generator() {
        let generator: GeneratorRef =
            Arc::new(|options: RequestOptions| async move {
                Ok::<_, anyhow::Error>(format!("GET {}", options.url))
            });
        let snippet = generator
            .generate(RequestOptions::get("http://example.com"))
            .await
            .expect("generate");
        assert_eq!(snippet, "GET http://example.com");
    }
}
