//! Syntax validation domain models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the pre-check rejected a text, and where.
///
/// `line` and `column` are 1-based and count characters, so they point at
/// the same place an editor would.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (line {line}, column {column})")]
pub struct SyntaxErrorDetail {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl SyntaxErrorDetail {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    /// `Unexpected token ')'`
    pub fn unexpected_token(token: &str, line: u32, column: u32) -> Self {
        Self::new(format!("Unexpected token '{}'", token), line, column)
    }

    pub fn unexpected_end(line: u32, column: u32) -> Self {
        Self::new("Unexpected end of input", line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let detail = SyntaxErrorDetail::unexpected_token(")", 3, 14);
        assert_eq!(
            detail.to_string(),
            "Unexpected token ')' (line 3, column 14)"
        );
    }
}
