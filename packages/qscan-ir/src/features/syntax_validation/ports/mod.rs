//! Syntax validation ports

use crate::features::syntax_validation::domain::SyntaxErrorDetail;

/// Cheap well-formedness check run before the full parser.
///
/// Implementations are pure: the same text always yields the same verdict.
pub trait SyntaxValidator: Send + Sync {
    fn validate(&self, code: &str) -> Result<(), SyntaxErrorDetail>;
}
