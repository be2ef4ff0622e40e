//! Common imports for vocab-harvest usage.
//!
//! ```
//! use vocab_harvest::prelude::*;
//! ```

pub use crate::config::ClientConfig;
pub use crate::errors::Error;
pub use crate::gemini::Client as GeminiClient;
pub use crate::harvester::Harvester;
pub use crate::invoker::RigInvoker;
pub use crate::translate::translate_word;

// Pipeline types callers need to read results and plug in their own model
pub use vocab_harvest_pipeline::entry::VocabularyEntry;
pub use vocab_harvest_pipeline::extraction::{ExtractionError, PipelineConfig, RunMetrics};
pub use vocab_harvest_pipeline::model::{ModelError, TextModel};

// Rig trait so users can build their own invoker from any provider client
pub use rig::client::CompletionClient;
