//! Base conversion backend contract and its single-settle adapter.
//!
//! The backend exposes a language catalog and a callback-style `convert`.
//! [`convert_once`] turns one `convert` call into a future that settles
//! exactly once, whatever the backend does with the callback.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::warn;

use crate::error::{Result, SnippetError};
use crate::languages::Language;
use crate::request::Request;

/// Options bag forwarded to the backend. Dispatch always sends it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConvertOptions(pub BTreeMap<String, serde_json::Value>);

impl ConvertOptions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Completion callback: `(error, snippet)`.
///
/// The contract is one invocation per `convert` call. Extra invocations are
/// ignored by [`convert_once`].
pub type ConvertCallback = Box<dyn Fn(Option<anyhow::Error>, Option<String>) + Send + Sync>;

/// External conversion library.
pub trait CodegenBackend: Send + Sync {
    /// Built-in languages and variants.
    fn language_list(&self) -> BoxFuture<'_, anyhow::Result<Vec<Language>>>;

    /// Convert `request` for `language/variant`, reporting through `callback`.
    fn convert(
        &self,
        language: &str,
        variant: &str,
        request: Request,
        options: ConvertOptions,
        callback: ConvertCallback,
    );
}

/// Run one `convert` call and await its single outcome.
///
/// * callback error: `SnippetError::Conversion` carrying it unchanged
/// * no error and no snippet: `SnippetError::UndefinedSnippet`
/// * callback dropped uninvoked: `SnippetError::CallbackDropped`
///
/// A backend that keeps the callback alive and never calls it leaves this
/// future pending forever; callers wanting a bound must add their own timeout.
pub async fn convert_once(
    backend: &dyn CodegenBackend,
    language: &str,
    variant: &str,
    request: Request,
    options: ConvertOptions,
) -> Result<String> {
    let (tx, rx) = oneshot::channel::<Result<String>>();
    let slot = Mutex::new(Some(tx));

    let (lang, var) = (language.to_string(), variant.to_string());
    let callback: ConvertCallback = Box::new(move |error, snippet| {
        let Some(tx) = slot.lock().unwrap_or_else(PoisonError::into_inner).take() else {
            warn!("Converter invoked callback again for {}/{}; ignoring", lang, var);
            return;
        };

        let outcome = match (error, snippet) {
            (Some(error), _) => Err(SnippetError::Conversion(error)),
            (None, None) => Err(SnippetError::UndefinedSnippet {
                language: lang.clone(),
                variant: var.clone(),
            }),
            (None, Some(snippet)) => Ok(snippet),
        };
        // Receiver is gone only if the caller stopped waiting.
        let _ = tx.send(outcome);
    });

    backend.convert(language, variant, request, options, callback);

    rx.await.unwrap_or_else(|_| {
        Err(SnippetError::CallbackDropped {
            language: language.to_string(),
            variant: variant.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestOptions;

    /// Backend whose `convert` behavior is a plain function of the callback.
    struct ScriptedBackend<F>(F);

    impl<F> CodegenBackend for ScriptedBackend<F>
    where
        F: Fn(ConvertCallback) + Send + Sync,
    {
        fn language_list(&self) -> BoxFuture<'_, anyhow::Result<Vec<Language>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn convert(
            &self,
            _language: &str,
            _variant: &str,
            _request: Request,
            _options: ConvertOptions,
            callback: ConvertCallback,
        ) {
            (self.0)(callback)
        }
    }

    fn request() -> Request {
        Request::from(&RequestOptions::get("http://example.com"))
    }

    async fn run<F>(script: F) -> Result<String>
    where
        F: Fn(ConvertCallback) + Send + Sync,
    {
        let backend = ScriptedBackend(script);
        convert_once(&backend, "curl", "cURL", request(), ConvertOptions::default()).await
    }

    #[tokio::test]
    async fn test_success() {
        let result = run(|cb| cb(None, Some("curl http://example.com".to_string()))).await;
        assert_eq!(result.unwrap(), "curl http://example.com");
    }

    #[tokio::test]
    async fn test_error_is_carried_verbatim() {
        let result = run(|cb| cb(Some(anyhow::anyhow!("boom")), None)).await;
        match result {
            Err(SnippetError::Conversion(err)) => assert_eq!(err.to_string(), "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_wins_over_snippet() {
        let result = run(|cb| cb(Some(anyhow::anyhow!("boom")), Some("partial".to_string()))).await;
        assert!(matches!(result, Err(SnippetError::Conversion(_))));
    }

    #[tokio::test]
    async fn test_missing_snippet_is_invariant_violation() {
        let result = run(|cb| cb(None, None)).await;
        let err = result.unwrap_err();
        assert!(matches!(err, SnippetError::UndefinedSnippet { .. }));
        assert!(err.is_invariant_violation());
    }

    #[tokio::test]
    async fn test_empty_snippet_is_success() {
        let result = run(|cb| cb(None, Some(String::new()))).await;
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_first_invocation_wins() {
        let result = run(|cb| {
            cb(None, Some("first".to_string()));
            cb(Some(anyhow::anyhow!("late error")), None);
            cb(None, Some("second".to_string()));
        })
        .await;
        assert_eq!(result.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_dropped_callback() {
        let result = run(|cb: ConvertCallback| drop(cb)).await;
        assert!(matches!(result, Err(SnippetError::CallbackDropped { .. })));
    }

    #[tokio::test]
    async fn test_callback_from_another_task() {
        let result = run(|cb| {
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                cb(None, Some("async".to_string()));
            });
        })
        .await;
        assert_eq!(result.unwrap(), "async");
    }

    #[test]
    fn test_convert_options_serialize_as_empty_object() {
        let json = serde_json::to_string(&ConvertOptions::default()).expect("serialize");
        assert_eq!(json, "{}");
    }
}
