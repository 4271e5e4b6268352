//! N-gram language classifier
//!
//! Linear model over presence features: every distinct token (unigram) and
//! every distinct pair of consecutive tokens (bigram, joined by one space)
//! found in the sample contributes its weight once. The highest-scoring
//! language wins; ties go to the earlier language in the topology.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::config::{check_version, ConfigError, ConfigResult};
use crate::features::language_detection::domain::{
    LanguageId, ModelTopology, ModelWeights, VariantRule,
};
use crate::features::language_detection::ports::LanguageDetector;

/// Bundled topology artifact
pub const BUNDLED_TOPOLOGY_JSON: &str = include_str!("../../../../models/language_topology.json");

/// Bundled weights artifact
pub const BUNDLED_WEIGHTS_JSON: &str = include_str!("../../../../models/language_weights.json");

static BUNDLED_MODEL: OnceCell<Arc<LanguageModel>> = OnceCell::new();

/// Loaded, validated classification model
#[derive(Debug)]
pub struct LanguageModel {
    languages: Vec<ScoredLanguage>,
    min_score: f64,
    tokenizer: Regex,
    variants: Vec<VariantRule>,
}

#[derive(Debug)]
struct ScoredLanguage {
    id: String,
    bias: f64,
    features: BTreeMap<String, f64>,
}

impl LanguageModel {
    /// Build from the two JSON artifacts
    pub fn from_json_str(topology_json: &str, weights_json: &str) -> ConfigResult<Self> {
        let topology: ModelTopology = serde_json::from_str(topology_json)?;
        let weights: ModelWeights = serde_json::from_str(weights_json)?;
        Self::from_parts(topology, weights)
    }

    /// Load both artifacts from disk
    pub fn from_files(topology_path: &Path, weights_path: &Path) -> ConfigResult<Self> {
        let topology = std::fs::read_to_string(topology_path)?;
        let weights = std::fs::read_to_string(weights_path)?;
        Self::from_json_str(&topology, &weights)
    }

    /// The model shipped inside the crate, parsed once per process
    pub fn bundled() -> ConfigResult<Arc<Self>> {
        BUNDLED_MODEL
            .get_or_try_init(|| {
                Self::from_json_str(BUNDLED_TOPOLOGY_JSON, BUNDLED_WEIGHTS_JSON).map(Arc::new)
            })
            .cloned()
    }

    fn from_parts(topology: ModelTopology, mut weights: ModelWeights) -> ConfigResult<Self> {
        check_version(topology.version)?;
        check_version(weights.version)?;

        if topology.languages.is_empty() {
            return Err(ConfigError::LanguageModel(
                "topology lists no languages".to_string(),
            ));
        }
        if !topology.min_score.is_finite() {
            return Err(ConfigError::LanguageModel(
                "min_score must be finite".to_string(),
            ));
        }

        let tokenizer = Regex::new(&topology.token_pattern)
            .map_err(|e| ConfigError::LanguageModel(format!("invalid token_pattern: {}", e)))?;

        let mut languages = Vec::with_capacity(topology.languages.len());
        for id in &topology.languages {
            let entry = weights.languages.remove(id).ok_or_else(|| {
                ConfigError::LanguageModel(format!("no weights for language '{}'", id))
            })?;
            if let Some((feature, _)) = entry.features.iter().find(|(_, w)| !w.is_finite()) {
                return Err(ConfigError::LanguageModel(format!(
                    "non-finite weight for '{}' in '{}'",
                    feature, id
                )));
            }
            languages.push(ScoredLanguage {
                id: id.clone(),
                bias: entry.bias,
                features: entry.features,
            });
        }

        if let Some(extra) = weights.languages.keys().next() {
            return Err(ConfigError::LanguageModel(format!(
                "weights for '{}' which the topology does not list",
                extra
            )));
        }

        Ok(Self {
            languages,
            min_score: topology.min_score,
            tokenizer,
            variants: topology.variants,
        })
    }

    /// Distinct unigram and bigram features of `text`
    pub fn features(&self, text: &str) -> HashSet<String> {
        let tokens: Vec<&str> = self.tokenizer.find_iter(text).map(|m| m.as_str()).collect();

        let mut features: HashSet<String> = tokens.iter().map(|t| t.to_string()).collect();
        features.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        features
    }

    /// Score of every language, in topology order
    pub fn scores(&self, text: &str) -> Vec<(LanguageId, f64)> {
        let features = self.features(text);
        self.languages
            .iter()
            .map(|lang| {
                let score = lang.bias
                    + features
                        .iter()
                        .filter_map(|f| lang.features.get(f))
                        .sum::<f64>();
                (LanguageId::new(lang.id.as_str()), score)
            })
            .collect()
    }

    /// Top candidate after thresholding and variant rules
    pub fn classify(&self, text: &str) -> LanguageId {
        let mut best: Option<(LanguageId, f64)> = None;
        for (id, score) in self.scores(text) {
            // strict: earlier language keeps ties
            if best.as_ref().map_or(true, |(_, top)| score > *top) {
                best = Some((id, score));
            }
        }

        let Some((winner, score)) = best else {
            return LanguageId::unknown();
        };
        if score < self.min_score {
            return LanguageId::unknown();
        }

        self.variants
            .iter()
            .find(|rule| {
                rule.from == winner.as_str() && rule.markers.iter().any(|m| text.contains(m.as_str()))
            })
            .map(|rule| LanguageId::new(rule.to.as_str()))
            .unwrap_or(winner)
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }
}

/// Language detector backed by the n-gram model.
///
/// Construction never fails: when the model cannot be loaded the detector
/// stays up and answers `unknown` for every text.
#[derive(Debug, Clone)]
pub struct NgramLanguageDetector {
    model: Option<Arc<LanguageModel>>,
    sample_chars: usize,
}

impl NgramLanguageDetector {
    pub fn new(model: Arc<LanguageModel>, sample_chars: usize) -> Self {
        Self {
            model: Some(model),
            sample_chars,
        }
    }

    /// Wrap a load attempt; a failed load is logged and degrades to `unknown`
    pub fn from_load(result: ConfigResult<Arc<LanguageModel>>, sample_chars: usize) -> Self {
        match result {
            Ok(model) => {
                tracing::debug!(languages = model.language_count(), "language model loaded");
                Self::new(model, sample_chars)
            }
            Err(e) => {
                tracing::error!(error = %e, "language model failed to load; detection disabled");
                Self {
                    model: None,
                    sample_chars,
                }
            }
        }
    }

    /// Detector over the bundled model
    pub fn bundled(sample_chars: usize) -> Self {
        Self::from_load(LanguageModel::bundled(), sample_chars)
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Leading `sample_chars` characters, cut on a char boundary
    fn sample<'a>(&self, code: &'a str) -> &'a str {
        match code.char_indices().nth(self.sample_chars) {
            Some((end, _)) => &code[..end],
            None => code,
        }
    }
}

impl LanguageDetector for NgramLanguageDetector {
    fn detect(&self, code: &str) -> LanguageId {
        let Some(model) = &self.model else {
            tracing::warn!("language model unavailable, reporting unknown");
            return LanguageId::unknown();
        };
        model.classify(self.sample(code))
    }
}
