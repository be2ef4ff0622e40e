use thiserror::Error;

/// Failures while fetching page markup.
///
/// These never leave the crate through [`crate::MarkupAnalyzer::analyze`];
/// they are logged and turned into an empty hint list.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
