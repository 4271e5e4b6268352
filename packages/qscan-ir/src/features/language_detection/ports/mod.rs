//! Language detection ports

use crate::features::language_detection::domain::LanguageId;

/// Guesses the programming language of a text.
///
/// Tolerant of any input: non-code text yields a best guess or
/// `LanguageId::unknown()`, never an error. Pure for a fixed model.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, code: &str) -> LanguageId;
}
