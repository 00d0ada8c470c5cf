//! Error types for snippet generation.

use thiserror::Error;

/// Failure of a single snippet generation or catalog load.
///
/// Collaborator errors are carried as `anyhow::Error` and displayed
/// transparently so callers see exactly what the collaborator reported.
#[derive(Debug, Error)]
pub enum SnippetError {
    /// The base converter reported an error through its callback
    #[error(transparent)]
    Conversion(anyhow::Error),

    /// The base converter reported success but produced no snippet
    #[error("undefined snippet returned by converter for {language}/{variant}")]
    UndefinedSnippet { language: String, variant: String },

    /// A custom generator failed
    #[error(transparent)]
    Generator(anyhow::Error),

    /// The converter dropped its callback without ever invoking it
    #[error("converter dropped the callback for {language}/{variant} without a result")]
    CallbackDropped { language: String, variant: String },

    /// The base catalog could not be fetched
    #[error("failed to load language catalog: {0}")]
    Catalog(anyhow::Error),
}

impl SnippetError {
    /// Whether this error signals a contract breach by the converter rather
    /// than an ordinary conversion failure.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::UndefinedSnippet { .. } | Self::CallbackDropped { .. }
        )
    }
}

/// Result type alias for snippet operations.
pub type Result<T> = std::result::Result<T, SnippetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_is_transparent() {
        let err = SnippetError::Conversion(anyhow::anyhow!("unsupported variant"));
        assert_eq!(err.to_string(), "unsupported variant");
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_undefined_snippet_names_key() {
        let err = SnippetError::UndefinedSnippet {
            language: "curl".to_string(),
            variant: "cURL".to_string(),
        };
        assert!(err.to_string().contains("curl/cURL"));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_generator_error_keeps_source() {
        let err = SnippetError::Generator(anyhow::anyhow!("template failed"));
        match err {
            SnippetError::Generator(inner) => assert_eq!(inner.to_string(), "template failed"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
