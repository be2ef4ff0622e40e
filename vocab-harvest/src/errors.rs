//! Public error types for vocab-harvest.

use thiserror::Error;
use vocab_harvest_markup::MarkupError;
use vocab_harvest_pipeline::extraction::ExtractionError;
use vocab_harvest_pipeline::model::ModelError;

/// Errors that can occur when harvesting or translating vocabulary.
///
/// Display messages are meant to be shown to end users as-is; the wrapped
/// errors keep the full chain for logs.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key in the environment.
    #[error("GEMINI_API_KEY is not set. Create a key at https://aistudio.google.com/app/apikey")]
    MissingApiKey,

    /// The model service rejected the call for authorization or quota reasons.
    #[error("This model is not available with the current API key (possibly exceeded free quota): {0}")]
    ServiceUnavailable(String),

    /// The extraction pipeline gave up.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// The markup analyzer could not be set up.
    #[error("Markup analyzer error: {0}")]
    Markup(#[from] MarkupError),

    /// A model call failed for a reason other than authorization or quota.
    #[error("Model invocation failed: {0}")]
    Model(ModelError),

    /// The input cannot be processed at all.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ModelError> for Error {
    fn from(error: ModelError) -> Self {
        if error.is_service_denial() {
            Self::ServiceUnavailable(error.message().to_string())
        } else {
            Self::Model(error)
        }
    }
}

impl Error {
    /// True when retrying with the same key cannot help.
    #[must_use]
    pub const fn is_service_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_)
                | Self::Extraction(ExtractionError::ServiceUnavailable { .. })
        )
    }
}
