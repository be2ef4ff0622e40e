//! The `vocab-harvest` binary: extract vocabulary from a page, translate a
//! word, or inspect markup hints.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vocab_harvest::harvester::{page_hints, Harvester};
use vocab_harvest::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gemini model name
    #[arg(
        long,
        env = "VOCAB_HARVEST_MODEL",
        default_value = vocab_harvest::config::DEFAULT_MODEL,
        global = true
    )]
    model: String,

    /// Per-call model timeout in seconds
    #[arg(long, default_value_t = 120, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract taught vocabulary from a page and print it as JSON
    Extract {
        /// Page URL
        url: String,
        /// Source language code, or "auto"
        #[arg(long, default_value = "auto")]
        source: String,
        /// Language of the meanings
        #[arg(long, default_value = "ja")]
        target: String,
        /// Skip the markup-hinted retry
        #[arg(long)]
        no_hints: bool,
    },
    /// Translate a single word
    Translate {
        /// Word or short phrase
        word: String,
        /// Target language code
        #[arg(long, default_value = "ja")]
        target: String,
    },
    /// Print ranked markup hints for a page (no model call)
    Hints {
        /// Page URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::new()
        .with_model(cli.model)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    match cli.command {
        Commands::Extract {
            url,
            source,
            target,
            no_hints,
        } => {
            let harvester = Harvester::gemini(config.with_adaptive_retry(!no_hints))?;
            let entries = harvester
                .extract_vocabulary(&url, &source, &target)
                .await
                .map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Translate { word, target } => {
            let harvester = Harvester::gemini(config.with_adaptive_retry(false))?;
            let translated = harvester.translate_word(&word, &target).await.map_err(report)?;
            println!("{translated}");
        }
        Commands::Hints { url } => {
            let hints = page_hints(&url, &config)
                .await
                .context("failed to set up the page fetcher")?;
            if hints.is_empty() {
                tracing::warn!(%url, "no markup hints found");
            }
            println!("{}", serde_json::to_string_pretty(&hints)?);
        }
    }

    Ok(())
}

/// Attaches the end-user sentence to pipeline failures.
fn report(error: Error) -> anyhow::Error {
    match &error {
        Error::Extraction(inner) => {
            let message = inner.user_message();
            anyhow::Error::new(error).context(message)
        }
        _ => anyhow::Error::new(error),
    }
}
