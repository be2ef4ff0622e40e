//! Sources of markup hints for the adaptive retry.

use async_trait::async_trait;
use vocab_harvest_markup::{MarkupAnalyzer, MarkupHint};

/// Produces ranked content-region hints for a page. An empty list means no
/// adaptive fallback is available; it is not an error.
#[async_trait]
pub trait HintSource: Send + Sync {
    async fn hints_for(&self, url: &str) -> Vec<MarkupHint>;
}

#[async_trait]
impl HintSource for MarkupAnalyzer {
    async fn hints_for(&self, url: &str) -> Vec<MarkupHint> {
        self.analyze(url).await
    }
}

/// `None` disables the adaptive retry.
#[async_trait]
impl<T: HintSource> HintSource for Option<T> {
    async fn hints_for(&self, url: &str) -> Vec<MarkupHint> {
        match self {
            Some(source) => source.hints_for(url).await,
            None => Vec::new(),
        }
    }
}

/// Disables the adaptive retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

#[async_trait]
impl HintSource for NoHints {
    async fn hints_for(&self, _url: &str) -> Vec<MarkupHint> {
        Vec::new()
    }
}

/// Fixed hints, regardless of URL.
#[derive(Debug, Clone, Default)]
pub struct StaticHints(pub Vec<MarkupHint>);

#[async_trait]
impl HintSource for StaticHints {
    async fn hints_for(&self, _url: &str) -> Vec<MarkupHint> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint() -> MarkupHint {
        MarkupHint {
            selector: "table.glossary".to_string(),
            score: 8,
        }
    }

    #[tokio::test]
    async fn test_optional_source_defaults_to_no_hints() {
        let disabled: Option<StaticHints> = None;
        assert!(disabled.hints_for("https://example.com").await.is_empty());

        let enabled = Some(StaticHints(vec![hint()]));
        assert_eq!(enabled.hints_for("https://example.com").await, vec![hint()]);
    }

    #[tokio::test]
    async fn test_no_hints_is_empty() {
        assert!(NoHints.hints_for("https://example.com").await.is_empty());
    }
}
