//! Rig-backed implementation of the pipeline's model seam.

use std::time::Duration;

use async_trait::async_trait;
use rig::completion::message::AssistantContent;
use rig::completion::CompletionModel;
use rig::OneOrMany;
use vocab_harvest_pipeline::model::{ModelError, TextModel};

/// Sends prompts through any Rig `CompletionModel` with fixed sampling.
///
/// No retries here: the pipeline decides when a second call is useful.
#[derive(Clone)]
pub struct RigInvoker<M> {
    model: M,
    temperature: f64,
    timeout: Duration,
}

impl<M: CompletionModel> RigInvoker<M> {
    /// Wraps `model`, sending `temperature` with every request and giving up
    /// on a call after `timeout`.
    #[must_use]
    pub const fn new(model: M, temperature: f64, timeout: Duration) -> Self {
        Self {
            model,
            temperature,
            timeout,
        }
    }

    /// The wrapped Rig model.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: CompletionModel> TextModel for RigInvoker<M> {
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, ModelError> {
        let request = self
            .model
            .completion_request(prompt.to_string())
            .temperature(self.temperature)
            .max_tokens(max_output_tokens);

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| {
                ModelError::new(format!(
                    "model call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ModelError::new(e.to_string()))?;

        let text = collect_text(&response.choice);
        tracing::debug!(
            prompt_chars = char_count(prompt),
            response_chars = char_count(&text),
            max_output_tokens,
            "completion received"
        );
        Ok(text)
    }
}

// Unicode scalar values, not bytes.
fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Concatenates the text parts of an assistant turn, ignoring tool calls and
/// reasoning.
fn collect_text(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_text_joins_text_parts() {
        let choice = OneOrMany::many(vec![
            AssistantContent::text("{\"words\":["),
            AssistantContent::text("]}"),
        ])
        .unwrap();

        assert_eq!(collect_text(&choice), "{\"words\":[]}");
    }

    #[test]
    fn test_char_count_is_not_byte_length() {
        assert_eq!(char_count("走る"), 2);
        assert_eq!(char_count("d'accord"), 8);
        assert_eq!(char_count(""), 0);
    }

    #[test]
    fn test_collect_text_single_part() {
        let choice = OneOrMany::one(AssistantContent::text("hola"));
        assert_eq!(collect_text(&choice), "hola");
    }
}
