//! Configuration for the staged extraction run.

use crate::repair::{MAX_REPAIR_ATTEMPTS, RepairConfig};

/// Configuration for a [`super::VocabularyPipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Entries requested by the sample pass (default: 15).
    pub sample_limit: usize,
    /// Output budget of the sample call (default: 2048).
    pub sample_max_tokens: u64,
    /// Output budget of the full extraction call (default: 8192).
    pub full_max_tokens: u64,
    /// Output budget of each repair call (default: 4096).
    pub repair_max_tokens: u64,
    /// Model-assisted repair attempts, clamped to 1..=3 (default: 3).
    pub max_repair_attempts: usize,
    /// Candidate text sent to repair calls is cut to this many chars (default: 4000).
    pub repair_input_chars: usize,
    /// Prefix salvaged by the partial-text strategy (default: 3000).
    pub partial_prefix_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_limit: 15,
            sample_max_tokens: 2048,
            full_max_tokens: 8192,
            repair_max_tokens: 4096,
            max_repair_attempts: MAX_REPAIR_ATTEMPTS,
            repair_input_chars: 4000,
            partial_prefix_chars: 3000,
        }
    }
}

impl PipelineConfig {
    /// Set the number of entries requested by the sample pass.
    #[must_use]
    pub const fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Set the model-assisted repair attempts. Values above 3 are capped.
    #[must_use]
    pub const fn with_max_repair_attempts(mut self, max: usize) -> Self {
        self.max_repair_attempts = max;
        self
    }

    /// Set the output budget of the full extraction call.
    #[must_use]
    pub const fn with_full_max_tokens(mut self, tokens: u64) -> Self {
        self.full_max_tokens = tokens;
        self
    }

    /// Repair settings derived from this configuration.
    #[must_use]
    pub const fn repair(&self) -> RepairConfig {
        RepairConfig {
            max_attempts: self.max_repair_attempts,
            max_output_tokens: self.repair_max_tokens,
            input_chars: self.repair_input_chars,
        }
    }
}
