//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations
//!
//! Pipeline order: language_detection → syntax_validation → parsing →
//! quantum_patterns → cost_analysis

pub mod language_detection;
pub mod parsing;
pub mod quantum_patterns;
pub mod syntax_validation;

// Quantum resource and price model
pub mod cost_analysis;
