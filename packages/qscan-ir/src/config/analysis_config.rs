//! Analysis pipeline settings
//!
//! Knobs that shape a single analysis request. Everything here has a default
//! matching the hosted service, so an empty `analysis:` section is valid.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Default minimum submission length (UTF-16 code units, after trimming)
pub const DEFAULT_MIN_CODE_LENGTH: usize = 20;

/// Default number of characters handed to the language detector
pub const DEFAULT_DETECTION_SAMPLE_CHARS: usize = 10_000;

/// Default problem size for the combined cost estimate
pub const DEFAULT_PROBLEM_SIZE: f64 = 1_000_000.0;

/// Default hardware provider for the combined cost estimate
pub const DEFAULT_PROVIDER: &str = "Quantinuum";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalysisConfig {
    /// Submissions shorter than this are rejected before any processing
    pub min_code_length: usize,

    /// Prefix length sampled by the language detector
    pub detection_sample_chars: usize,

    /// Problem size N used for the report's cost estimate
    pub default_problem_size: f64,

    /// Provider used for the report's cost estimate
    pub default_provider: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_code_length: DEFAULT_MIN_CODE_LENGTH,
            detection_sample_chars: DEFAULT_DETECTION_SAMPLE_CHARS,
            default_problem_size: DEFAULT_PROBLEM_SIZE,
            default_provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_code_length == 0 || self.min_code_length > 10_000 {
            return Err(ConfigError::range_with_hint(
                "min_code_length",
                self.min_code_length,
                1,
                10_000,
                "Minimum submission length must be at least 1",
            ));
        }

        if self.detection_sample_chars < 64 {
            return Err(ConfigError::range_with_hint(
                "detection_sample_chars",
                self.detection_sample_chars,
                64,
                usize::MAX,
                "Detector needs a meaningful sample",
            ));
        }

        if !self.default_problem_size.is_finite() || self.default_problem_size < 1.0 {
            return Err(ConfigError::Validation(format!(
                "default_problem_size must be a finite number >= 1, got {}",
                self.default_problem_size
            )));
        }

        if self.default_provider.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_provider must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
