//! Language Detection
//!
//! Decides whether a submission is already JavaScript (`js` / `jsx`) or has
//! to be translated first. Backed by a bundled n-gram model split into two
//! artifacts under `models/`:
//! - `language_topology.json`: candidate order, threshold, tokenizer,
//!   variant rules (js → jsx on JSX markers)
//! - `language_weights.json`: per-language bias and feature weights
//!
//! Only the top candidate is kept. A model that fails to load disables
//! detection (every text is `unknown`) instead of taking the process down.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{LanguageId, LanguageWeights, ModelTopology, ModelWeights, VariantRule};
pub use infrastructure::{LanguageModel, NgramLanguageDetector};
pub use ports::LanguageDetector;
