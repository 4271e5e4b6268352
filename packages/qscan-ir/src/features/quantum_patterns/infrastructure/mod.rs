//! Quantum pattern infrastructure

mod analyzer;

pub use analyzer::AstPatternAnalyzer;
