//! Language detection infrastructure

mod ngram_detector;

pub use ngram_detector::{
    LanguageModel, NgramLanguageDetector, BUNDLED_TOPOLOGY_JSON, BUNDLED_WEIGHTS_JSON,
};
