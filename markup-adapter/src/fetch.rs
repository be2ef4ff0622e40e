//! Raw page retrieval.

use crate::error::MarkupError;
use crate::types::MarkupConfig;

/// Builds the HTTP client used for page fetches.
///
/// # Errors
/// Returns `MarkupError::ClientBuild` if the TLS backend cannot be initialised.
pub fn build_client(config: &MarkupConfig) -> Result<reqwest::Client, MarkupError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout)
        .build()
        .map_err(MarkupError::ClientBuild)
}

/// Fetches the raw markup behind `url`.
///
/// # Errors
/// Returns an error on transport failure, a non-success status, or an
/// unreadable body.
pub async fn fetch_markup(client: &reqwest::Client, url: &str) -> Result<String, MarkupError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(|source| MarkupError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MarkupError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| MarkupError::Body {
        url: url.to_string(),
        source,
    })
}
