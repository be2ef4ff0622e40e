//! The public extraction boundary.

use vocab_harvest_markup::{MarkupAnalyzer, MarkupHint};
use vocab_harvest_pipeline::entry::{ExtractionRequest, VocabularyEntry};
use vocab_harvest_pipeline::extraction::{PipelineConfig, RunMetrics, VocabularyPipeline};
use vocab_harvest_pipeline::hints::HintSource;
use vocab_harvest_pipeline::model::TextModel;

use crate::config::ClientConfig;
use crate::errors::Error;
use crate::gemini::{self, GeminiModel};
use crate::invoker::RigInvoker;
use crate::translate::translate_word;

/// Extracts vocabulary from pages and translates single words.
///
/// Holds no per-request state; one harvester can serve concurrent calls.
pub struct Harvester<M, H = Option<MarkupAnalyzer>> {
    pipeline: VocabularyPipeline<M, H>,
}

impl Harvester<RigInvoker<GeminiModel>, Option<MarkupAnalyzer>> {
    /// Gemini-backed harvester with markup hints unless disabled in `config`.
    ///
    /// # Errors
    ///
    /// `Error::MissingApiKey` without `GEMINI_API_KEY`, `Error::Markup` if
    /// the page fetcher cannot be built.
    pub fn gemini(config: ClientConfig) -> Result<Self, Error> {
        let hints = if config.adaptive_retry {
            Some(MarkupAnalyzer::new(config.markup.clone())?)
        } else {
            None
        };
        let pipeline_config = config.pipeline.clone();
        let client = gemini::Client::from_config(config)?;

        Ok(Self::new(client.invoker(), hints, pipeline_config))
    }
}

impl<M: TextModel, H: HintSource> Harvester<M, H> {
    /// Harvester over any model and hint source.
    #[must_use]
    pub const fn new(model: M, hints: H, config: PipelineConfig) -> Self {
        Self {
            pipeline: VocabularyPipeline::with_config(model, hints, config),
        }
    }

    /// Extracts the vocabulary `url` teaches, with meanings in
    /// `target_language`. `source_language` may be `"auto"`.
    ///
    /// # Errors
    ///
    /// `Error::Extraction` with the pipeline's terminal failure.
    pub async fn extract_vocabulary(
        &self,
        url: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<VocabularyEntry>, Error> {
        self.extract_with_metrics(url, source_language, target_language)
            .await
            .map(|(entries, _)| entries)
    }

    /// Same as [`Self::extract_vocabulary`], also returning run metrics.
    ///
    /// # Errors
    ///
    /// See [`Self::extract_vocabulary`].
    pub async fn extract_with_metrics(
        &self,
        url: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(Vec<VocabularyEntry>, RunMetrics), Error> {
        let request = ExtractionRequest::new(url, source_language, target_language);
        Ok(self.pipeline.extract_with_metrics(&request).await?)
    }

    /// Translates one word with the same model.
    ///
    /// # Errors
    ///
    /// See [`translate_word`].
    pub async fn translate_word(&self, text: &str, target_language: &str) -> Result<String, Error> {
        translate_word(self.pipeline.model(), text, target_language).await
    }
}

/// Ranked markup hints for `url`, without any model call.
///
/// # Errors
///
/// `Error::Markup` if the page fetcher cannot be built. Fetch failures
/// yield an empty list.
pub async fn page_hints(url: &str, config: &ClientConfig) -> Result<Vec<MarkupHint>, Error> {
    let analyzer = MarkupAnalyzer::new(config.markup.clone())?;
    Ok(analyzer.analyze(url).await)
}
