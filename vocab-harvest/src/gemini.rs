//! Gemini client setup.
//!
//! # Example
//!
//! ```no_run
//! # use vocab_harvest::gemini::Client;
//! # use vocab_harvest::config::ClientConfig;
//! # fn example() -> Result<(), vocab_harvest::errors::Error> {
//! let client = Client::from_config(ClientConfig::default().with_model("gemini-1.5-flash"))?;
//! let invoker = client.invoker();
//! # Ok(())
//! # }
//! ```

use rig::client::{CompletionClient, ProviderClient};
use rig::providers::gemini;

use crate::config::ClientConfig;
use crate::errors::Error;
use crate::invoker::RigInvoker;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Rig completion model type for Gemini.
pub type GeminiModel = <gemini::Client as CompletionClient>::CompletionModel;

/// Gemini provider client.
///
/// Reads the key from `GEMINI_API_KEY`. Construction fails with
/// `Error::MissingApiKey` instead of panicking when it is absent.
#[derive(Clone)]
pub struct Client {
    inner: gemini::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingApiKey` if `GEMINI_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingApiKey` if `GEMINI_API_KEY` is unset or blank.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => {}
            _ => return Err(Error::MissingApiKey),
        }

        tracing::debug!(model = %config.model, "initializing Gemini client");
        Ok(Self {
            inner: gemini::Client::from_env(),
            config,
        })
    }

    /// Client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Model invoker for the configured model.
    #[must_use]
    pub fn invoker(&self) -> RigInvoker<GeminiModel> {
        RigInvoker::new(
            self.inner.completion_model(self.config.model.clone()),
            self.config.temperature,
            self.config.timeout,
        )
    }
}
