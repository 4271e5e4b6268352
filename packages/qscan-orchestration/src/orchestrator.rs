//! Analysis orchestrator
//!
//! Sequences one request through the pipeline:
//!
//! ```text
//! length check → detect → [translate] → pre-check → parse → analyze → estimate
//! ```
//!
//! Translation is the only network call and runs under a timeout. The
//! CPU-bound stages run on the blocking pool so a large submission does not
//! stall other requests. Cost estimation is best effort: a failure is
//! logged and the report goes out with no estimates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use qscan_ir::config::AnalysisConfig;
use qscan_ir::features::cost_analysis::{
    CostEstimationUseCase, CostEstimationUseCaseImpl, PricingTable,
};
use qscan_ir::features::language_detection::{LanguageModel, NgramLanguageDetector};
use qscan_ir::features::parsing::TreeSitterParser;
use qscan_ir::features::quantum_patterns::{AstPatternAnalyzer, DetectPatternsUseCase};
use qscan_ir::features::syntax_validation::TreeSitterValidator;
use qscan_ir::{
    CostEstimate, LanguageDetector, LanguageId, PatternReport, SyntaxValidator,
};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::config::ServiceConfig;
use crate::error::{AnalysisFailure, InputError, OrchestratorError, Result};
use crate::report::{AdvantageScore, AnalysisReport};
use crate::translator::{CodeTranslator, OpenAiTranslator, TranslationError};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

type PatternPipeline = DetectPatternsUseCase<TreeSitterParser, AstPatternAnalyzer>;

pub struct AnalysisOrchestrator {
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn CodeTranslator>,
    validator: Arc<dyn SyntaxValidator>,
    patterns: Arc<PatternPipeline>,
    estimator: Arc<dyn CostEstimationUseCase>,
    settings: AnalysisConfig,
    translation_timeout: Duration,
}

impl AnalysisOrchestrator {
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn CodeTranslator>,
        pricing: Arc<PricingTable>,
        settings: AnalysisConfig,
        translation_timeout: Duration,
    ) -> Self {
        Self {
            detector,
            translator,
            validator: Arc::new(TreeSitterValidator::new()),
            patterns: Arc::new(DetectPatternsUseCase::new(
                TreeSitterParser::new(),
                AstPatternAnalyzer::new(),
            )),
            estimator: Arc::new(CostEstimationUseCaseImpl::new(pricing)),
            settings,
            translation_timeout,
        }
    }

    /// Wire the production components described by `config`.
    ///
    /// A pricing table that fails to load is fatal; a language model that
    /// fails to load only disables detection.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let pricing = match &config.pricing_path {
            Some(path) => PricingTable::from_yaml(path)?,
            None => PricingTable::bundled()?,
        };
        info!(providers = pricing.len(), "pricing table loaded");

        let sample_chars = config.analysis.detection_sample_chars;
        let detector = match &config.language_model {
            Some(paths) => NgramLanguageDetector::from_load(
                LanguageModel::from_files(&paths.topology_path, &paths.weights_path).map(Arc::new),
                sample_chars,
            ),
            None => NgramLanguageDetector::bundled(sample_chars),
        };

        let translator = OpenAiTranslator::new(config.translator.clone())
            .map_err(OrchestratorError::config)?;

        Ok(Self::new(
            Arc::new(detector),
            Arc::new(translator),
            Arc::new(pricing),
            config.analysis.clone(),
            config.translator.timeout(),
        ))
    }

    /// Run one submission through the whole pipeline
    pub async fn analyze(&self, code: &str) -> std::result::Result<AnalysisReport, AnalysisFailure> {
        let request_id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let span = info_span!("code_analysis", request_id);
        self.run(code).instrument(span).await
    }

    async fn run(&self, code: &str) -> std::result::Result<AnalysisReport, AnalysisFailure> {
        let started = Instant::now();
        self.check_submission(code)?;

        let language = self.detector.detect(code);
        let conversion_required = !language.is_javascript_family();
        info!(language = %language, conversion_required, "language detected");

        let outcome = async {
            let javascript = if conversion_required {
                self.translate(code, &language).await?
            } else {
                code.to_string()
            };
            self.find_patterns(javascript).await
        }
        .await;

        let patterns = match outcome {
            Ok(patterns) => patterns,
            Err(e) => {
                if e.status().is_server_error() {
                    error!(error = %e, category = %e.category(), "analysis request failed");
                } else {
                    info!(error = %e, "submission rejected");
                }
                return Err(AnalysisFailure::new(e).with_language(&language));
            }
        };

        let cost_estimates = self.estimate_costs(&patterns);
        let report = AnalysisReport::assemble(
            language,
            conversion_required,
            patterns,
            cost_estimates,
            AdvantageScore::roll(),
        );

        info!(
            speedup_potential = report.quantum_speedup_potential,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );
        Ok(report)
    }

    fn check_submission(&self, code: &str) -> Result<()> {
        // JavaScript `trim().length`: UTF-16 code units
        let length = code.trim().encode_utf16().count();
        if length == 0 || length < self.settings.min_code_length {
            return Err(InputError::TooShort {
                length,
                min: self.settings.min_code_length,
            }
            .into());
        }
        Ok(())
    }

    async fn translate(&self, code: &str, language: &LanguageId) -> Result<String> {
        let translated = tokio::time::timeout(
            self.translation_timeout,
            self.translator.translate(code, language),
        )
        .await
        .map_err(|_| TranslationError::Timeout(self.translation_timeout))??;

        debug!(bytes = translated.len(), "translated submission");
        Ok(translated)
    }

    async fn find_patterns(&self, javascript: String) -> Result<PatternReport> {
        let validator = Arc::clone(&self.validator);
        let patterns = Arc::clone(&self.patterns);

        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            validator.validate(&javascript)?;
            let report = patterns.execute(&javascript)?;
            debug!(findings = report.finding_count(), "pattern analysis finished");
            Ok::<_, qscan_ir::QscanError>(report)
        })
        .await
        .map_err(OrchestratorError::analysis)?
        .map_err(OrchestratorError::from)
    }

    /// One combined estimate over every flagged algorithm, or none
    fn estimate_costs(&self, patterns: &PatternReport) -> Vec<CostEstimate> {
        let flagged = patterns.flagged_algorithms();
        if flagged.is_empty() {
            return Vec::new();
        }

        match self.estimator.estimate_flagged(
            &flagged,
            self.settings.default_problem_size,
            &self.settings.default_provider,
        ) {
            Ok(estimate) => vec![estimate],
            Err(e) => {
                warn!(error = %e, "cost estimation failed, omitting estimates");
                Vec::new()
            }
        }
    }
}
