//! Model-assisted repair with a hard attempt cap.

use serde_json::Value;

use super::basic::{basic_repair, has_start_marker, parse_word_list};
use super::{RepairAttempt, RepairConfig, RepairError, RepairFailure, RepairOutcome};
use crate::model::TextModel;
use crate::profile::LanguageProfile;
use crate::prompts::{repair_prompt, truncate_chars};

/// A structurally valid list recovered by the model.
#[derive(Debug, Clone)]
pub struct Repaired {
    pub items: Vec<Value>,
    /// Model calls spent, including the successful one.
    pub attempts: usize,
}

/// Sends broken text back to the model with repair instructions taken from
/// the language profile, validating each answer like a local repair.
pub struct ModelRepairer<'a, M: TextModel + ?Sized> {
    model: &'a M,
    profile: &'a LanguageProfile,
    config: RepairConfig,
}

impl<'a, M: TextModel + ?Sized> ModelRepairer<'a, M> {
    #[must_use]
    pub const fn new(model: &'a M, profile: &'a LanguageProfile, config: RepairConfig) -> Self {
        Self {
            model,
            profile,
            config,
        }
    }

    /// Runs the bounded repair loop.
    ///
    /// Attempts are strictly sequential; attempt N+1 starts only after
    /// attempt N was rejected. Never more than [`super::MAX_REPAIR_ATTEMPTS`].
    ///
    /// # Errors
    ///
    /// `RepairError::ServiceDenied` as soon as the model refuses a call for
    /// authorization or quota reasons, `RepairError::Exhausted` once every
    /// attempt was rejected.
    pub async fn repair(&self, candidate: &str) -> Result<Repaired, RepairError> {
        let max_attempts = self.config.attempt_budget();
        let input_text = truncate_chars(candidate, self.config.input_chars);
        let mut history: Vec<RepairAttempt> = Vec::new();

        for attempt in 1..=max_attempts {
            let prompt = repair_prompt(
                self.profile,
                &input_text,
                attempt,
                max_attempts,
                history.last(),
            );

            let (response_text, result) = match self
                .model
                .generate(&prompt, self.config.max_output_tokens)
                .await
            {
                Ok(raw) => {
                    let result = validate_repair_response(&raw);
                    (raw, result)
                }
                Err(e) if e.is_service_denial() => return Err(RepairError::ServiceDenied(e)),
                Err(e) => (String::new(), Err(RepairFailure::Model(e.to_string()))),
            };

            match result {
                Ok(items) => {
                    tracing::info!(
                        attempt,
                        entries = items.len(),
                        "model-assisted repair succeeded"
                    );
                    return Ok(Repaired {
                        items,
                        attempts: attempt,
                    });
                }
                Err(reason) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        %reason,
                        "model-assisted repair rejected"
                    );
                    history.push(RepairAttempt {
                        attempt_number: attempt,
                        input_text: input_text.clone(),
                        response_text,
                        outcome: RepairOutcome::Failure { reason },
                    });
                }
            }
        }

        Err(RepairError::Exhausted {
            attempts: max_attempts,
            history,
        })
    }
}

/// A repair answer must at least contain the start marker; otherwise local
/// repair would just synthesize an empty list out of prose.
fn validate_repair_response(raw: &str) -> Result<Vec<Value>, RepairFailure> {
    if !has_start_marker(raw) {
        return Err(RepairFailure::MissingMarker);
    }
    parse_word_list(&basic_repair(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use crate::profile::resolve;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        responses: Mutex<Vec<Result<String, ModelError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<String, ModelError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextModel for Scripted {
        async fn generate(&self, prompt: &str, _max: u64) -> Result<String, ModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("still not json".to_string()))
        }
    }

    #[tokio::test]
    async fn test_never_exceeds_three_attempts() {
        let model = Scripted::new(Vec::new());
        let profile = resolve("auto", "en");
        let config = RepairConfig {
            max_attempts: 99,
            ..RepairConfig::default()
        };

        let result = ModelRepairer::new(&model, &profile, config).repair("{\"words\":[{").await;

        match result {
            Err(RepairError::Exhausted { attempts, history }) => {
                assert_eq!(attempts, 3);
                assert_eq!(history.len(), 3);
                assert_eq!(history[2].attempt_number, 3);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(model.calls(), 3);
    }

    #[tokio::test]
    async fn test_second_attempt_succeeds_with_feedback() {
        let model = Scripted::new(vec![
            Ok("Sorry, here you go".to_string()),
            Ok(
                "```json\n{\"words\":[{\"word\":\"agree\",\"meaning\":\"to agree\"}]}\n```"
                    .to_string(),
            ),
        ]);
        let profile = resolve("auto", "en");

        let repaired = ModelRepairer::new(&model, &profile, RepairConfig::default())
            .repair("{\"words\":[{\"word\":\"agree\",")
            .await
            .unwrap();

        assert_eq!(repaired.attempts, 2);
        assert_eq!(repaired.items.len(), 1);
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[1].contains("Attempt 2/3"));
        assert!(prompts[1].contains("Sorry, here you go"));
    }

    #[tokio::test]
    async fn test_denial_stops_the_loop() {
        let model = Scripted::new(vec![Err(ModelError::new("429 quota exceeded"))]);
        let profile = resolve("auto", "en");

        let result = ModelRepairer::new(&model, &profile, RepairConfig::default())
            .repair("broken")
            .await;

        assert!(matches!(result, Err(RepairError::ServiceDenied(_))));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_error_counts_as_failed_attempt() {
        let model = Scripted::new(vec![
            Err(ModelError::new("connection reset")),
            Ok("{\"words\":[]}".to_string()),
        ]);
        let profile = resolve("auto", "en");

        let repaired = ModelRepairer::new(&model, &profile, RepairConfig::default())
            .repair("broken")
            .await
            .unwrap();

        assert_eq!(repaired.attempts, 2);
        assert!(repaired.items.is_empty());
    }

    #[tokio::test]
    async fn test_candidate_is_truncated_in_prompt() {
        let model = Scripted::new(vec![Ok("{\"words\":[]}".to_string())]);
        let profile = resolve("auto", "en");
        let config = RepairConfig {
            input_chars: 10,
            ..RepairConfig::default()
        };
        let candidate = "x".repeat(50);

        ModelRepairer::new(&model, &profile, config).repair(&candidate).await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].ends_with(&format!("{}...", "x".repeat(10))));
    }
}
