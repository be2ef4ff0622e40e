//! Structured vocabulary extraction from web pages through an untrusted
//! language model.
//!
//! Model output is treated as hostile: it is repaired locally, then with
//! bounded model help, then validated entry by entry before anything is
//! returned.

pub mod entry;
pub mod extraction;
pub mod hints;
pub mod model;
pub mod profile;
pub mod prompts;
pub mod repair;

/// Common types for driving a pipeline.
pub mod prelude {
    pub use crate::entry::{ExtractionRequest, VocabularyEntry};
    pub use crate::extraction::{
        ExtractionError, PipelineConfig, RunMetrics, Stage, VocabularyPipeline,
    };
    pub use crate::hints::{HintSource, NoHints, StaticHints};
    pub use crate::model::{ModelError, TextModel};
    pub use crate::profile::{LanguageProfile, resolve};
}
