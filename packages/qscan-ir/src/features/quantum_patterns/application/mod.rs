//! Quantum pattern application layer

mod detect_patterns;

pub use detect_patterns::DetectPatternsUseCase;
