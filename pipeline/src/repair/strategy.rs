//! Ordered repair strategies, evaluated until one yields a valid structure.

use serde_json::Value;

use super::basic::{basic_repair, parse_word_list};
use super::model_assisted::ModelRepairer;
use super::RepairError;
use crate::model::{ModelError, TextModel};
use crate::prompts::truncate_chars;

/// One way of turning model output into a `words` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStrategy {
    /// Local string surgery on the whole text.
    Basic,
    /// Bounded model-assisted repair.
    ModelAssisted,
    /// Local repair of a bounded prefix, salvaging whatever entries precede
    /// the corruption.
    PartialPrefix { chars: usize },
}

impl RepairStrategy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::ModelAssisted => "model-assisted",
            Self::PartialPrefix { .. } => "partial-prefix",
        }
    }
}

/// Successful cascade result.
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    pub items: Vec<Value>,
    pub strategy: RepairStrategy,
    /// Model calls spent on model-assisted repair.
    pub model_attempts: usize,
}

/// Why the cascade produced nothing.
#[derive(Debug)]
pub enum CascadeFailure {
    /// The model service refused a repair call.
    Denied(ModelError),
    /// Every strategy failed.
    Exhausted {
        model_attempts: usize,
        reasons: Vec<String>,
    },
}

enum StepError {
    Rejected(String),
    Denied(ModelError),
}

/// Applies `strategies` in order to `text`, stopping at the first one that
/// yields a structurally valid list.
///
/// # Errors
///
/// `CascadeFailure::Denied` if the model refuses a repair call,
/// `CascadeFailure::Exhausted` once every strategy failed.
pub async fn run_cascade<M: TextModel + ?Sized>(
    strategies: &[RepairStrategy],
    text: &str,
    repairer: &ModelRepairer<'_, M>,
) -> Result<CascadeOutcome, CascadeFailure> {
    let mut model_attempts = 0;
    let mut reasons = Vec::new();

    for &strategy in strategies {
        let step = match strategy {
            RepairStrategy::Basic => {
                parse_word_list(&basic_repair(text)).map_err(|e| StepError::Rejected(e.to_string()))
            }
            RepairStrategy::ModelAssisted => match repairer.repair(text).await {
                Ok(repaired) => {
                    model_attempts += repaired.attempts;
                    Ok(repaired.items)
                }
                Err(RepairError::Exhausted { attempts, .. }) => {
                    model_attempts += attempts;
                    Err(StepError::Rejected(format!("exhausted after {attempts} attempts")))
                }
                Err(RepairError::ServiceDenied(e)) => Err(StepError::Denied(e)),
            },
            RepairStrategy::PartialPrefix { chars } => {
                let prefix = truncate_chars(text, chars);
                parse_word_list(&basic_repair(&prefix))
                    .map_err(|e| StepError::Rejected(e.to_string()))
            }
        };

        match step {
            Ok(items) => {
                tracing::debug!(
                    strategy = strategy.name(),
                    entries = items.len(),
                    "repair strategy succeeded"
                );
                return Ok(CascadeOutcome {
                    items,
                    strategy,
                    model_attempts,
                });
            }
            Err(StepError::Denied(e)) => return Err(CascadeFailure::Denied(e)),
            Err(StepError::Rejected(reason)) => {
                tracing::warn!(strategy = strategy.name(), %reason, "repair strategy failed");
                reasons.push(format!("{}: {reason}", strategy.name()));
            }
        }
    }

    Err(CascadeFailure::Exhausted {
        model_attempts,
        reasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve;
    use crate::repair::RepairConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        response: Result<String, ModelError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextModel for Fixed {
        async fn generate(&self, _prompt: &str, _max: u64) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn fixed(response: Result<&str, &str>) -> Fixed {
        Fixed {
            response: response.map(str::to_string).map_err(ModelError::new),
            calls: AtomicUsize::new(0),
        }
    }

    const BROKEN: &str = r#"{"words":[{"word":"agree","meaning":"to agree"},{"word":"x","meaning":"y" "oops"}]}"#;

    #[tokio::test]
    async fn test_basic_success_skips_the_model() {
        let model = fixed(Ok("unused"));
        let profile = resolve("auto", "en");
        let repairer = ModelRepairer::new(&model, &profile, RepairConfig::default());

        let outcome = run_cascade(
            &[RepairStrategy::Basic, RepairStrategy::ModelAssisted],
            r#"{"words":[{"word":"agree","meaning":"to agree"}]}"#,
            &repairer,
        )
        .await
        .unwrap();

        assert_eq!(outcome.strategy, RepairStrategy::Basic);
        assert_eq!(outcome.model_attempts, 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_partial_prefix_salvages_leading_entries() {
        let model = fixed(Ok("no structure here"));
        let profile = resolve("auto", "en");
        let repairer = ModelRepairer::new(&model, &profile, RepairConfig::default());

        let outcome = run_cascade(
            &[
                RepairStrategy::Basic,
                RepairStrategy::ModelAssisted,
                RepairStrategy::PartialPrefix { chars: 50 },
            ],
            BROKEN,
            &repairer,
        )
        .await
        .unwrap();

        assert_eq!(outcome.strategy, RepairStrategy::PartialPrefix { chars: 50 });
        assert_eq!(outcome.model_attempts, 3);
        assert_eq!(outcome.items.len(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_every_strategy() {
        let model = fixed(Ok("no structure here"));
        let profile = resolve("auto", "en");
        let repairer = ModelRepairer::new(&model, &profile, RepairConfig::default());

        let failure = run_cascade(
            &[RepairStrategy::Basic, RepairStrategy::ModelAssisted],
            BROKEN,
            &repairer,
        )
        .await
        .unwrap_err();

        match failure {
            CascadeFailure::Exhausted {
                model_attempts,
                reasons,
            } => {
                assert_eq!(model_attempts, 3);
                assert_eq!(reasons.len(), 2);
                assert!(reasons[0].starts_with("basic:"));
                assert!(reasons[1].starts_with("model-assisted:"));
            }
            CascadeFailure::Denied(e) => panic!("unexpected denial: {e}"),
        }
    }

    #[tokio::test]
    async fn test_denial_short_circuits() {
        let model = fixed(Err("API key is not authorized"));
        let profile = resolve("auto", "en");
        let repairer = ModelRepairer::new(&model, &profile, RepairConfig::default());

        let failure = run_cascade(
            &[
                RepairStrategy::Basic,
                RepairStrategy::ModelAssisted,
                RepairStrategy::PartialPrefix { chars: 50 },
            ],
            BROKEN,
            &repairer,
        )
        .await
        .unwrap_err();

        assert!(matches!(failure, CascadeFailure::Denied(_)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }
}
