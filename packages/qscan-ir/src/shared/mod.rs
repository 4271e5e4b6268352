//! Shared module - Common types used across all features.
//!
//! It has ZERO external dependencies beyond serde (no tree-sitter).

pub mod models;

// Re-exports for convenience
pub use models::*;
