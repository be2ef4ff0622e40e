//! Markup hint analysis for vocabulary extraction.
//!
//! Fetches a page and ranks the `tag.class` signatures most likely to wrap a
//! repeated list of vocabulary items. Used only as a steering fallback when a
//! model extracts nothing, so every failure degrades to "no hints".

pub mod error;
pub mod fetch;
pub mod score;
pub mod types;

pub use error::MarkupError;
pub use fetch::fetch_markup;
pub use score::score_markup;
pub use types::*;

/// Fetches pages and ranks their likely vocabulary regions.
#[derive(Clone)]
pub struct MarkupAnalyzer {
    client: reqwest::Client,
    config: MarkupConfig,
}

impl MarkupAnalyzer {
    /// Creates an analyzer with its own HTTP client.
    ///
    /// # Errors
    /// Returns `MarkupError::ClientBuild` if the HTTP client cannot be created.
    pub fn new(config: MarkupConfig) -> Result<Self, MarkupError> {
        let client = fetch::build_client(&config)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub const fn config(&self) -> &MarkupConfig {
        &self.config
    }

    /// Fetches `url` and returns its ranked hints. Never fails: fetch errors
    /// and non-success statuses produce an empty list.
    pub async fn analyze(&self, url: &str) -> Vec<MarkupHint> {
        let html = match fetch_markup(&self.client, url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error = %e, "markup fetch failed, no hints available");
                return Vec::new();
            }
        };

        let hints = score_markup(&html, self.config.max_hints, self.config.max_elements);
        tracing::debug!(url, count = hints.len(), "markup hints ranked");
        hints
    }
}
