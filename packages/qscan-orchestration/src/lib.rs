/*
 * Qscan Orchestration - async service layer
 *
 * Architecture:
 * - Orchestrator (detect → translate → validate → parse → analyze → estimate)
 * - Code translation through an OpenAI-compatible completion API
 * - HTTP server (POST /code-analysis, GET /health)
 * - Service configuration (versioned YAML + env overrides)
 */

// Public modules
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod server;
pub mod translator;

// Re-exports
pub use config::{LanguageModelPaths, ServerConfig, ServiceConfig, TranslatorConfig};
pub use error::{
    AnalysisFailure, ErrorBody, ErrorCategory, InputError, OrchestratorError, Result, SyntaxStage,
};
pub use orchestrator::AnalysisOrchestrator;
pub use report::{AdvantageScore, AnalysisReport};
pub use server::{AnalysisServer, AppState};
pub use translator::{CodeTranslator, OpenAiTranslator, TranslationError};
