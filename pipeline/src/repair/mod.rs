//! Structural repair of untrusted model output.
//!
//! - [`basic_repair`] - deterministic local string surgery
//! - [`ModelRepairer`] - model-assisted repair, bounded to three attempts
//! - [`RepairStrategy`] / [`run_cascade`] - ordered fallible strategies,
//!   first success wins

pub mod basic;
pub mod model_assisted;
pub mod strategy;

use thiserror::Error;

use crate::model::ModelError;

pub use basic::{EMPTY_WORD_LIST, START_MARKER, basic_repair, parse_word_list};
pub use model_assisted::{ModelRepairer, Repaired};
pub use strategy::{CascadeFailure, CascadeOutcome, RepairStrategy, run_cascade};

/// Hard cap on model-assisted repair attempts for one text.
pub const MAX_REPAIR_ATTEMPTS: usize = 3;

/// Why a single repair step did not produce a usable structure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepairFailure {
    /// The text is not valid JSON.
    #[error("not parseable as JSON: {0}")]
    Unparseable(String),
    /// Valid JSON, but not an object with a `words` array.
    #[error("structurally invalid: {0}")]
    Structure(String),
    /// The repair response did not even contain the start marker.
    #[error("words array not found in repair response")]
    MissingMarker,
    /// The model call itself failed for a non-terminal reason.
    #[error("model call failed: {0}")]
    Model(String),
}

/// Outcome of one model-assisted repair attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// A structurally valid list with this many raw elements.
    Success { entries: usize },
    /// The attempt was rejected.
    Failure { reason: RepairFailure },
}

/// Record of one model-assisted repair attempt.
#[derive(Debug, Clone)]
pub struct RepairAttempt {
    /// 1-indexed.
    pub attempt_number: usize,
    /// Candidate text as sent to the model (after truncation).
    pub input_text: String,
    /// Raw model response, empty when the call failed.
    pub response_text: String,
    pub outcome: RepairOutcome,
}

/// Terminal failures of the model-assisted repair loop.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Every attempt was rejected.
    #[error("Repair failed after {attempts} attempts")]
    Exhausted {
        attempts: usize,
        history: Vec<RepairAttempt>,
    },

    /// The model service refused the call; repair cannot help.
    #[error("Model service denied the repair request: {0}")]
    ServiceDenied(ModelError),
}

/// Knobs for the model-assisted repair loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairConfig {
    /// Attempts before giving up, clamped to `1..=MAX_REPAIR_ATTEMPTS`.
    pub max_attempts: usize,
    /// Output budget of each repair call.
    pub max_output_tokens: u64,
    /// Candidate text longer than this many chars is truncated.
    pub input_chars: usize,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_REPAIR_ATTEMPTS,
            max_output_tokens: 4096,
            input_chars: 4000,
        }
    }
}

impl RepairConfig {
    /// Effective attempt budget.
    #[must_use]
    pub fn attempt_budget(&self) -> usize {
        self.max_attempts.clamp(1, MAX_REPAIR_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_budget_is_capped() {
        let mut config = RepairConfig::default();
        assert_eq!(config.attempt_budget(), 3);

        config.max_attempts = 10;
        assert_eq!(config.attempt_budget(), 3);

        config.max_attempts = 0;
        assert_eq!(config.attempt_budget(), 1);
    }
}
