//! # vocab-harvest
//!
//! Extract the vocabulary a web page teaches, as validated word/meaning pairs.
//!
//! The model is reached through Rig's `CompletionModel`, so any Rig provider
//! works; [`gemini::Client`] wires up the default Gemini setup. Model output
//! is repaired and validated by `vocab-harvest-pipeline` before it reaches
//! the caller.
//!
//! ## Example
//!
//! ```no_run
//! # use vocab_harvest::prelude::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let harvester = Harvester::gemini(ClientConfig::default())?;
//!
//! let entries = harvester
//!     .extract_vocabulary("https://example.com/lesson-1", "auto", "ja")
//!     .await?;
//!
//! for entry in entries {
//!     println!("{} - {}", entry.word, entry.meaning);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// Shared client configuration.
pub mod config;

/// Public error types.
pub mod errors;

/// Gemini client setup.
pub mod gemini;

/// Extraction entry point.
pub mod harvester;

/// Rig-backed model invoker.
pub mod invoker;

/// Single-word translation.
pub mod translate;

/// Commonly used types and traits.
pub mod prelude;
