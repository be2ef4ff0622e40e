//! Shared client configuration for the Gemini-backed harvester.

use std::time::Duration;

use vocab_harvest_markup::MarkupConfig;
use vocab_harvest_pipeline::extraction::PipelineConfig;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for a [`crate::gemini::Client`] and the harvester built on it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gemini model name.
    ///
    /// Default: `gemini-2.0-flash`
    pub model: String,

    /// Sampling temperature sent with every call. Kept low so repeated runs
    /// over the same page stay close to each other.
    ///
    /// Default: 0.1
    pub temperature: f64,

    /// Upper bound on a single model call.
    ///
    /// Default: 120 seconds
    pub timeout: Duration,

    /// Whether a failed sample pass may retry with markup hints.
    ///
    /// Default: true
    pub adaptive_retry: bool,

    /// Token budgets and repair bounds.
    pub pipeline: PipelineConfig,

    /// Page fetch settings for markup hints.
    pub markup: MarkupConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            timeout: Duration::from_secs(120),
            adaptive_retry: true,
            pipeline: PipelineConfig::default(),
            markup: MarkupConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new `ClientConfig` with default settings.
    ///
    /// Equivalent to `ClientConfig::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different Gemini model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable the markup-hinted retry.
    #[must_use]
    pub const fn with_adaptive_retry(mut self, enabled: bool) -> Self {
        self.adaptive_retry = enabled;
        self
    }

    /// Replace the pipeline settings.
    #[must_use]
    pub const fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }
}
