//! Staged vocabulary extraction.
//!
//! - [`VocabularyPipeline`] - sample pass, adaptive retry, full pass, repair,
//!   validation
//! - [`ExtractionError`] - terminal failures surfaced to callers
//! - [`RunMetrics`] - stage trace, model calls, token estimates
//! - [`PipelineConfig`] - token budgets and retry bounds

pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;

pub use config::PipelineConfig;
pub use error::ExtractionError;
pub use metrics::{RunMetrics, Stage, estimate_tokens};
pub use orchestrator::VocabularyPipeline;
