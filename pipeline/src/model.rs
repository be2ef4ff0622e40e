//! The seam to the generative text model.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

// Lower-cased phrases that mark an authorization or quota rejection.
const DENIAL_PHRASES: [&str; 9] = [
    "api key is not authorized",
    "api key not valid",
    "not found",
    "quota",
    "resource_exhausted",
    "permission_denied",
    "unauthorized",
    "rate limit",
    "billing",
];

// Denial status codes, only as whole numbers.
#[allow(clippy::unwrap_used)]
static DENIAL_STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:401|403|429)\b").unwrap());

/// Error reported by the model service, message kept verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ModelError {
    message: String,
}

impl ModelError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the service refused the call for authorization or quota
    /// reasons, i.e. retrying or repairing cannot help.
    #[must_use]
    pub fn is_service_denial(&self) -> bool {
        let message = self.message.to_lowercase();
        DENIAL_PHRASES.iter().any(|phrase| message.contains(phrase))
            || DENIAL_STATUS_RE.is_match(&message)
    }
}

/// Prompt in, free-form text out.
///
/// Implementations use fixed low-temperature sampling and never retry;
/// deciding whether a retry is useful belongs to the caller.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Sends `prompt` and returns the raw response text.
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, ModelError>;
}

#[async_trait]
impl<T: TextModel + ?Sized> TextModel for Arc<T> {
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, ModelError> {
        (**self).generate(prompt, max_output_tokens).await
    }
}

#[async_trait]
impl<T: TextModel + ?Sized> TextModel for &T {
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, ModelError> {
        (**self).generate(prompt, max_output_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_and_auth_messages_are_denials() {
        for message in [
            "[GoogleGenerativeAI Error]: API key is not authorized to use this model",
            "429 Too Many Requests: Quota exceeded for metric",
            "RESOURCE_EXHAUSTED",
            "models/gemini-x is not found for API version v1beta",
            "ProviderError: PERMISSION_DENIED",
        ] {
            assert!(ModelError::new(message).is_service_denial(), "{message}");
        }
    }

    #[test]
    fn test_transient_messages_are_not_denials() {
        for message in ["connection reset by peer", "502 Bad Gateway", "request timed out"] {
            assert!(!ModelError::new(message).is_service_denial(), "{message}");
        }
    }

    #[test]
    fn test_bare_status_codes_are_denials() {
        for message in ["HTTP 401", "status: 403", "error 429 from upstream"] {
            assert!(ModelError::new(message).is_service_denial(), "{message}");
        }
    }

    #[test]
    fn test_digits_inside_longer_numbers_are_not_denials() {
        for message in [
            "connection reset, request id 84291",
            "upstream took 4030ms then closed the stream",
            "502 Bad Gateway (trace 14015)",
        ] {
            assert!(!ModelError::new(message).is_service_denial(), "{message}");
        }
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let error = ModelError::new("Quota exceeded");
        assert_eq!(error.message(), "Quota exceeded");
        assert_eq!(error.to_string(), "Quota exceeded");
    }
}
