use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser-like identity sent with page fetches to avoid trivial bot blocking.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// A candidate content region, identified by its `tag.class` signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupHint {
    pub selector: String,
    /// Summed heuristic score over every element with this signature.
    pub score: u32,
}

/// Fetch and ranking settings for [`crate::MarkupAnalyzer`].
#[derive(Debug, Clone)]
pub struct MarkupConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Number of ranked signatures to keep.
    pub max_hints: usize,
    /// Upper bound on visited elements, so pathological pages stay cheap.
    pub max_elements: usize,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            max_hints: 5,
            max_elements: 20_000,
        }
    }
}

impl MarkupConfig {
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_hints(mut self, max_hints: usize) -> Self {
        self.max_hints = max_hints;
        self
    }
}
