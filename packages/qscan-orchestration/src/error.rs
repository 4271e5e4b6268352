use hyper::StatusCode;
use qscan_ir::config::ConfigError;
use qscan_ir::features::cost_analysis::EstimationError;
use qscan_ir::LanguageId;
use serde::Serialize;
use thiserror::Error;

use crate::translator::TranslationError;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// User-correctable problems with the submission itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("No code provided or code too short for analysis (min {min} chars)")]
    TooShort { length: usize, min: usize },

    #[error("Input does not appear to be valid code or pseudocode.")]
    NotCode,
}

/// Which stage rejected the JavaScript text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxStage {
    /// Strict pre-check
    PreCheck,
    /// Full parser
    Parse,
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Syntax error: {details}")]
    Syntax { stage: SyntaxStage, details: String },

    #[error("Translation service error: {0}")]
    TranslationService(TranslationError),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TranslationError> for OrchestratorError {
    fn from(e: TranslationError) -> Self {
        match e {
            TranslationError::NotCode => Self::Input(InputError::NotCode),
            other => Self::TranslationService(other),
        }
    }
}

impl From<qscan_ir::QscanError> for OrchestratorError {
    fn from(e: qscan_ir::QscanError) -> Self {
        use qscan_ir::QscanError;

        match e {
            QscanError::Syntax(detail) => Self::Syntax {
                stage: SyntaxStage::PreCheck,
                details: detail.to_string(),
            },
            QscanError::Parse(details) => Self::Syntax {
                stage: SyntaxStage::Parse,
                details,
            },
            QscanError::Estimation(e) => Self::Estimation(e),
            QscanError::Config(e) => Self::Config(e),
            QscanError::Io(e) => Self::Io(e),
            QscanError::Analysis(msg) => Self::Analysis(msg),
        }
    }
}

impl OrchestratorError {
    pub fn analysis<E: std::fmt::Display>(e: E) -> Self {
        Self::Analysis(e.to_string())
    }

    pub fn config<E: std::fmt::Display>(e: E) -> Self {
        Self::Config(ConfigError::Validation(e.to_string()))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Input(_) | Self::Syntax { .. } | Self::Estimation(_) => ErrorCategory::Permanent,
            Self::TranslationService(e) => e.category(),
            Self::Analysis(_) | Self::Config(_) | Self::Io(_) => ErrorCategory::Infrastructure,
        }
    }

    /// HTTP status the caller sees
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Input(_) | Self::Syntax { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short tag and details for the error body.
    ///
    /// 500-class details are generic; the real cause only goes to the log.
    pub fn describe(&self) -> (String, String) {
        match self {
            Self::Input(e @ InputError::TooShort { length, .. }) => (
                e.to_string(),
                format!("Received {} characters", length),
            ),
            Self::Input(e @ InputError::NotCode) => (
                e.to_string(),
                "The submission could not be recognized as source code".to_string(),
            ),
            Self::Syntax {
                stage: SyntaxStage::PreCheck,
                details,
            } => ("Invalid JavaScript syntax".to_string(), details.clone()),
            Self::Syntax {
                stage: SyntaxStage::Parse,
                details,
            } => ("Syntax error in submitted code".to_string(), details.clone()),
            Self::TranslationService(e) => (
                "Failed to convert code to JavaScript".to_string(),
                e.public_details(),
            ),
            Self::Analysis(_) => (
                "Failed to analyze code".to_string(),
                "An unexpected error occurred during analysis".to_string(),
            ),
            Self::Estimation(_) | Self::Config(_) | Self::Io(_) => (
                "Internal server error".to_string(),
                "The service is not able to process this request".to_string(),
            ),
        }
    }
}

/// A failed analysis request, with the language detected before the failure
#[derive(Error, Debug)]
#[error("{error}")]
pub struct AnalysisFailure {
    #[source]
    pub error: OrchestratorError,
    pub detected_language: Option<LanguageId>,
}

impl AnalysisFailure {
    pub fn new(error: impl Into<OrchestratorError>) -> Self {
        Self {
            error: error.into(),
            detected_language: None,
        }
    }

    pub fn with_language(mut self, language: &LanguageId) -> Self {
        self.detected_language = Some(language.clone());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.error.status()
    }

    pub fn body(&self) -> ErrorBody {
        let (error, details) = self.error.describe();
        ErrorBody {
            error,
            details,
            detected_language: self.detected_language.clone(),
        }
    }
}

impl From<OrchestratorError> for AnalysisFailure {
    fn from(error: OrchestratorError) -> Self {
        Self::new(error)
    }
}

/// JSON body of every non-200 response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<LanguageId>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
            detected_language: None,
        }
    }
}

/// Error category for retry advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Transient error - the caller may retry (e.g., timeout, connection)
    Transient,
    /// Permanent error - retrying the same input fails the same way
    Permanent,
    /// Infrastructure error - alert ops (e.g., missing credentials)
    Infrastructure,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transient => "transient",
            ErrorCategory::Permanent => "permanent",
            ErrorCategory::Infrastructure => "infrastructure",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Transient)
    }
}

impl std::str::FromStr for ErrorCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "transient" => Ok(ErrorCategory::Transient),
            "permanent" => Ok(ErrorCategory::Permanent),
            "infrastructure" => Ok(ErrorCategory::Infrastructure),
            _ => Err(format!("Invalid error category: {}", s)),
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
