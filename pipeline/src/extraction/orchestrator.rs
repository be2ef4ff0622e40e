//! Staged extraction: sample pass, adaptive retry, full pass, repair,
//! validation.

use tokio::time::Instant;
use vocab_harvest_markup::MarkupHint;

use super::config::PipelineConfig;
use super::error::ExtractionError;
use super::metrics::{MeteredModel, RunMetrics, Stage};
use crate::entry::{
    ExtractionRequest, VocabularyEntry, dedupe_entries, retain_well_formed, validate_entries,
};
use crate::hints::{HintSource, NoHints};
use crate::model::TextModel;
use crate::profile::{LanguageProfile, resolve};
use crate::prompts::{full_prompt, sample_prompt};
use crate::repair::{CascadeFailure, ModelRepairer, RepairStrategy, run_cascade};

const SAMPLE_CASCADE: [RepairStrategy; 2] = [RepairStrategy::Basic, RepairStrategy::ModelAssisted];

/// Result of one sample pass.
enum SampleOutcome {
    /// Output was repaired into a list; it may still hold no valid entry.
    Parsed(Vec<VocabularyEntry>),
    /// Every repair strategy failed.
    Malformed { attempts: usize },
}

impl SampleOutcome {
    fn failure(&self) -> ExtractionError {
        match self {
            Self::Malformed { attempts } => ExtractionError::MalformedOutput {
                attempts: *attempts,
            },
            Self::Parsed(_) => ExtractionError::NoVocabularyFound,
        }
    }
}

/// Extracts taught vocabulary from a page through an untrusted model.
///
/// Stateless between runs; concurrent `extract` calls share nothing but the
/// model's rate limit.
pub struct VocabularyPipeline<M, H = NoHints> {
    model: M,
    hints: H,
    config: PipelineConfig,
}

impl<M: TextModel> VocabularyPipeline<M, NoHints> {
    /// Creates a pipeline without adaptive retry.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            hints: NoHints,
            config: PipelineConfig::default(),
        }
    }
}

impl<M: TextModel, H: HintSource> VocabularyPipeline<M, H> {
    /// Creates a pipeline with the given hint source and configuration.
    #[must_use]
    pub const fn with_config(model: M, hints: H, config: PipelineConfig) -> Self {
        Self { model, hints, config }
    }

    /// Replaces the hint source (fluent builder pattern).
    #[must_use]
    pub fn hints<H2: HintSource>(self, hints: H2) -> VocabularyPipeline<M, H2> {
        VocabularyPipeline {
            model: self.model,
            hints,
            config: self.config,
        }
    }

    /// Sets the maximum number of model-assisted repair attempts.
    #[must_use]
    pub const fn max_repair_attempts(mut self, max: usize) -> Self {
        self.config.max_repair_attempts = max;
        self
    }

    /// The wrapped model, for calls outside the extraction stages.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline and returns the deduplicated entries.
    ///
    /// # Errors
    ///
    /// `ServiceUnavailable` on authorization/quota rejection at any stage,
    /// `NoVocabularyFound` or `MalformedOutput` when no stage produced a
    /// valid entry, `Model` when the sample call fails outright,
    /// `InvalidRequest` for an empty URL.
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Vec<VocabularyEntry>, ExtractionError> {
        self.extract_with_metrics(request).await.map(|(entries, _)| entries)
    }

    /// Same as [`Self::extract`], also returning run metrics.
    ///
    /// # Errors
    ///
    /// See [`Self::extract`].
    pub async fn extract_with_metrics(
        &self,
        request: &ExtractionRequest,
    ) -> Result<(Vec<VocabularyEntry>, RunMetrics), ExtractionError> {
        if request.url().trim().is_empty() {
            return Err(ExtractionError::InvalidRequest("URL is empty".to_string()));
        }

        let start = Instant::now();
        let mut metrics = RunMetrics::default();
        let model = MeteredModel::new(&self.model);
        let profile = resolve(request.source_language(), request.target_language());
        let repairer = ModelRepairer::new(&model, &profile, self.config.repair());

        tracing::info!(
            url = request.url(),
            source = profile.source_name,
            target = profile.target_name,
            "starting vocabulary extraction"
        );

        let result = self
            .run_stages(request, &profile, &model, &repairer, &mut metrics)
            .await;

        model.record_into(&mut metrics);
        metrics.wall_time = start.elapsed();
        tracing::info!(
            stages = ?metrics.stages,
            model_calls = metrics.model_calls,
            repair_attempts = metrics.repair_attempts,
            estimated_input_tokens = metrics.estimated_input_tokens,
            estimated_output_tokens = metrics.estimated_output_tokens,
            wall_time_ms = u64::try_from(metrics.wall_time.as_millis()).unwrap_or(u64::MAX),
            ok = result.is_ok(),
            "vocabulary extraction finished"
        );

        result.map(|entries| (entries, metrics))
    }

    async fn run_stages(
        &self,
        request: &ExtractionRequest,
        profile: &LanguageProfile,
        model: &MeteredModel<'_, M>,
        repairer: &ModelRepairer<'_, MeteredModel<'_, M>>,
        metrics: &mut RunMetrics,
    ) -> Result<Vec<VocabularyEntry>, ExtractionError> {
        metrics.enter(Stage::Sampling);
        let sample_entries = match self
            .sample_pass(request, profile, &[], model, repairer, metrics)
            .await?
        {
            SampleOutcome::Parsed(entries) if !entries.is_empty() => entries,
            failed => {
                self.adaptive_retry(request, profile, model, repairer, metrics, &failed)
                    .await?
            }
        };

        metrics.enter(Stage::FullExtraction);
        let full_entries = self.full_pass(request, profile, model, repairer, metrics).await?;

        metrics.enter(Stage::Validating);
        let chosen = if full_entries.is_empty() {
            tracing::warn!(
                sample_entries = sample_entries.len(),
                "full extraction produced no valid entries, falling back to sample result"
            );
            sample_entries
        } else {
            full_entries
        };

        let entries = dedupe_entries(retain_well_formed(chosen));
        if entries.is_empty() {
            return Err(ExtractionError::NoVocabularyFound);
        }

        tracing::info!(entries = entries.len(), "vocabulary extraction succeeded");
        Ok(entries)
    }

    /// Re-runs the sample pass steered by markup hints. Runs at most once, and
    /// not at all when the page yields no hints.
    async fn adaptive_retry(
        &self,
        request: &ExtractionRequest,
        profile: &LanguageProfile,
        model: &MeteredModel<'_, M>,
        repairer: &ModelRepairer<'_, MeteredModel<'_, M>>,
        metrics: &mut RunMetrics,
        failed: &SampleOutcome,
    ) -> Result<Vec<VocabularyEntry>, ExtractionError> {
        let hints = self.hints.hints_for(request.url()).await;
        if hints.is_empty() {
            tracing::warn!("sample pass found nothing and no markup hints are available");
            return Err(failed.failure());
        }

        metrics.enter(Stage::AdaptiveRetry);

        tracing::info!(
            hints = ?hints.iter().map(|h| h.selector.as_str()).collect::<Vec<_>>(),
            "retrying sample pass with markup hints"
        );

        match self.sample_pass(request, profile, &hints, model, repairer, metrics).await? {
            SampleOutcome::Parsed(entries) if !entries.is_empty() => Ok(entries),
            still_failed => Err(still_failed.failure()),
        }
    }

    async fn sample_pass(
        &self,
        request: &ExtractionRequest,
        profile: &LanguageProfile,
        hints: &[MarkupHint],
        model: &MeteredModel<'_, M>,
        repairer: &ModelRepairer<'_, MeteredModel<'_, M>>,
        metrics: &mut RunMetrics,
    ) -> Result<SampleOutcome, ExtractionError> {
        let prompt = sample_prompt(request.url(), profile, self.config.sample_limit, hints);
        let raw = model
            .generate(&prompt, self.config.sample_max_tokens)
            .await
            .map_err(ExtractionError::from_model)?;

        match run_cascade(&SAMPLE_CASCADE, &raw, repairer).await {
            Ok(outcome) => {
                metrics.repair_attempts += outcome.model_attempts;
                let entries = validate_entries(&outcome.items);
                tracing::info!(
                    entries = entries.len(),
                    strategy = outcome.strategy.name(),
                    "sample pass parsed"
                );
                Ok(SampleOutcome::Parsed(entries))
            }
            Err(CascadeFailure::Denied(e)) => Err(ExtractionError::from_model(e)),
            Err(CascadeFailure::Exhausted {
                model_attempts,
                reasons,
            }) => {
                metrics.repair_attempts += model_attempts;
                tracing::warn!(?reasons, "sample output could not be repaired");
                Ok(SampleOutcome::Malformed {
                    attempts: model_attempts,
                })
            }
        }
    }

    /// Full extraction plus repair. An empty result means "use the sample".
    async fn full_pass(
        &self,
        request: &ExtractionRequest,
        profile: &LanguageProfile,
        model: &MeteredModel<'_, M>,
        repairer: &ModelRepairer<'_, MeteredModel<'_, M>>,
        metrics: &mut RunMetrics,
    ) -> Result<Vec<VocabularyEntry>, ExtractionError> {
        let prompt = full_prompt(request.url(), profile);
        let raw = match model.generate(&prompt, self.config.full_max_tokens).await {
            Ok(raw) => raw,
            Err(e) if e.is_service_denial() => return Err(ExtractionError::from_model(e)),
            Err(e) => {
                tracing::warn!(error = %e, "full extraction call failed");
                return Ok(Vec::new());
            }
        };

        metrics.enter(Stage::Repairing);
        let cascade = [
            RepairStrategy::Basic,
            RepairStrategy::ModelAssisted,
            RepairStrategy::PartialPrefix {
                chars: self.config.partial_prefix_chars,
            },
        ];

        match run_cascade(&cascade, &raw, repairer).await {
            Ok(outcome) => {
                metrics.repair_attempts += outcome.model_attempts;
                let entries = validate_entries(&outcome.items);
                tracing::info!(
                    entries = entries.len(),
                    strategy = outcome.strategy.name(),
                    "full extraction repaired"
                );
                Ok(entries)
            }
            Err(CascadeFailure::Denied(e)) => Err(ExtractionError::from_model(e)),
            Err(CascadeFailure::Exhausted {
                model_attempts,
                reasons,
            }) => {
                metrics.repair_attempts += model_attempts;
                tracing::warn!(?reasons, "full extraction output could not be repaired");
                Ok(Vec::new())
            }
        }
    }
}
