//! Terminal failures of an extraction run.

use thiserror::Error;

use crate::model::ModelError;

/// Errors surfaced to the caller of [`super::VocabularyPipeline::extract`].
///
/// Everything recoverable (malformed output with an earlier partial result,
/// missing markup hints) is handled inside the pipeline.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The model service rejected the call for authorization or quota reasons.
    #[error("Model service unavailable with the current API key (possibly exceeded free quota): {message}")]
    ServiceUnavailable {
        /// Provider message, unchanged.
        message: String,
    },

    /// Model output could not be repaired at any stage.
    #[error("Model output could not be repaired after {attempts} repair attempts")]
    MalformedOutput {
        /// Model-assisted repair attempts spent before giving up.
        attempts: usize,
    },

    /// Every stage produced zero valid entries.
    #[error("No vocabulary found on the page")]
    NoVocabularyFound,

    /// The model call failed for a reason other than authorization or quota.
    #[error("Model invocation failed: {0}")]
    Model(String),

    /// The request cannot be run at all.
    #[error("Invalid extraction request: {0}")]
    InvalidRequest(String),
}

impl ExtractionError {
    /// Classifies a failed model call.
    #[must_use]
    pub fn from_model(error: ModelError) -> Self {
        if error.is_service_denial() {
            Self::ServiceUnavailable {
                message: error.message().to_string(),
            }
        } else {
            Self::Model(error.message().to_string())
        }
    }

    /// One human-readable sentence per failure kind, for end users.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable { .. } => {
                "This model is not available with the current API key (possibly exceeded free quota)."
            }
            Self::MalformedOutput { .. } => {
                "The extracted data could not be read. Please try again later."
            }
            Self::NoVocabularyFound => {
                "Could not extract words from the site. Please check the site format."
            }
            Self::Model(_) => "The vocabulary service failed. Please try again later.",
            Self::InvalidRequest(_) => "Please enter a valid URL.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_classifies_denials() {
        let denied = ExtractionError::from_model(ModelError::new("Quota exceeded"));
        assert!(matches!(
            denied,
            ExtractionError::ServiceUnavailable { ref message } if message == "Quota exceeded"
        ));

        let transient = ExtractionError::from_model(ModelError::new("connection reset"));
        assert!(matches!(transient, ExtractionError::Model(_)));
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = [
            ExtractionError::ServiceUnavailable {
                message: String::new(),
            },
            ExtractionError::MalformedOutput { attempts: 3 },
            ExtractionError::NoVocabularyFound,
            ExtractionError::Model(String::new()),
            ExtractionError::InvalidRequest(String::new()),
        ];
        let mut messages: Vec<_> = errors.iter().map(ExtractionError::user_message).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }
}
