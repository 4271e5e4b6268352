//! Error types for qscan-ir
//!
//! Provides unified error handling across the crate. Feature slices keep
//! their own precise error types and convert into `QscanError` at the
//! crate boundary.

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::features::cost_analysis::domain::EstimationError;
use crate::features::syntax_validation::domain::SyntaxErrorDetail;

/// Main error type for qscan-ir operations
#[derive(Debug, Error)]
pub enum QscanError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pre-check rejected the text
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxErrorDetail),

    /// Parser could not recover a program from the text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unexpected failure while walking the tree
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Cost estimation failed
    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl QscanError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        QscanError::Parse(msg.into())
    }

    /// True for failures caused by the submitted text itself
    pub fn is_syntax(&self) -> bool {
        matches!(self, QscanError::Syntax(_) | QscanError::Parse(_))
    }
}

/// Result type alias for qscan operations
pub type Result<T> = std::result::Result<T, QscanError>;
