//! Language detection domain models

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a detected language ("js", "jsx", "python", "unknown", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Exactly `js` and `jsx`; everything else needs translation
    pub fn is_javascript_family(&self) -> bool {
        matches!(self.0.as_str(), "js" | "jsx")
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Rewrites a winning language into a variant when a marker is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantRule {
    pub from: String,
    pub to: String,
    pub markers: Vec<String>,
}

/// Model topology: which languages exist, in which order, and how a raw
/// score becomes a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelTopology {
    pub version: Option<u32>,

    /// Candidate order; earlier wins ties
    pub languages: Vec<String>,

    /// Best score below this means "unknown"
    pub min_score: f64,

    /// Token regex; bigrams are built from consecutive matches
    pub token_pattern: String,

    #[serde(default)]
    pub variants: Vec<VariantRule>,
}

/// Linear weights for one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageWeights {
    #[serde(default)]
    pub bias: f64,

    /// Unigram (`"def"`) and bigram (`": number"`) feature weights
    pub features: BTreeMap<String, f64>,
}

/// Weights artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelWeights {
    pub version: Option<u32>,
    pub languages: BTreeMap<String, LanguageWeights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_family() {
        assert!(LanguageId::new("js").is_javascript_family());
        assert!(LanguageId::new("jsx").is_javascript_family());
        assert!(!LanguageId::new("ts").is_javascript_family());
        assert!(!LanguageId::unknown().is_javascript_family());
        assert!(LanguageId::unknown().is_unknown());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&LanguageId::new("python")).unwrap();
        assert_eq!(json, "\"python\"");
    }
}
