//! Per-run metrics and token estimation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::model::{ModelError, TextModel};

/// Pipeline state, recorded in visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sampling,
    AdaptiveRetry,
    FullExtraction,
    Repairing,
    Validating,
}

/// Metrics collected during one extraction run.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Stages entered, in order.
    pub stages: Vec<Stage>,
    /// Model calls of any kind, repair calls included.
    pub model_calls: usize,
    /// Model-assisted repair calls.
    pub repair_attempts: usize,
    /// Estimated input tokens sent to the model.
    pub estimated_input_tokens: usize,
    /// Estimated output tokens received from the model.
    pub estimated_output_tokens: usize,
    /// Wall-clock time of the run.
    pub wall_time: Duration,
}

impl RunMetrics {
    pub(crate) fn enter(&mut self, stage: Stage) {
        tracing::info!(?stage, "entering stage");
        self.stages.push(stage);
    }
}

/// Estimate token count from text using the 4-chars-per-token heuristic.
///
/// Counts chars, not bytes, and rounds up.
///
/// # Examples
///
/// ```
/// use vocab_harvest_pipeline::extraction::estimate_tokens;
///
/// assert_eq!(estimate_tokens("hello"), 2);
/// assert_eq!(estimate_tokens("hello world"), 3);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Wraps a model and counts every call made through it.
pub(crate) struct MeteredModel<'a, M: TextModel + ?Sized> {
    inner: &'a M,
    calls: AtomicUsize,
    input_tokens: AtomicUsize,
    output_tokens: AtomicUsize,
}

impl<'a, M: TextModel + ?Sized> MeteredModel<'a, M> {
    pub(crate) const fn new(inner: &'a M) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            input_tokens: AtomicUsize::new(0),
            output_tokens: AtomicUsize::new(0),
        }
    }

    pub(crate) fn record_into(&self, metrics: &mut RunMetrics) {
        metrics.model_calls = self.calls.load(Ordering::Relaxed);
        metrics.estimated_input_tokens = self.input_tokens.load(Ordering::Relaxed);
        metrics.estimated_output_tokens = self.output_tokens.load(Ordering::Relaxed);
    }
}

#[async_trait]
impl<M: TextModel + ?Sized> TextModel for MeteredModel<'_, M> {
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.input_tokens.fetch_add(estimate_tokens(prompt), Ordering::Relaxed);

        let result = self.inner.generate(prompt, max_output_tokens).await;

        match &result {
            Ok(text) => {
                self.output_tokens.fetch_add(estimate_tokens(text), Ordering::Relaxed);
                tracing::debug!(
                    prompt_chars = prompt.chars().count(),
                    response_chars = text.chars().count(),
                    max_output_tokens,
                    "model call completed"
                );
            }
            Err(e) => tracing::debug!(error = %e, "model call failed"),
        }
        result
    }
}
