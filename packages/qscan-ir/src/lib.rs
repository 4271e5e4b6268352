/*
 * Qscan IR - quantum-advantage analysis core
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, LineRef)
 * - features/    : Vertical slices (detection → validation → parsing → patterns → cost)
 * - config/      : YAML configuration and bundled pricing
 *
 * Synchronous and I/O free apart from loading configuration files; the
 * service layer (HTTP, translation, async runtime) lives in
 * qscan-orchestration.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (pipeline stages)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use errors::{QscanError, Result};
pub use features::cost_analysis::{AlgorithmTag, CostEstimate, PricingTable};
pub use features::language_detection::{LanguageDetector, LanguageId};
pub use features::parsing::{ParsedTree, Parser};
pub use features::quantum_patterns::{Finding, PatternAnalyzer, PatternReport};
pub use features::syntax_validation::{SyntaxErrorDetail, SyntaxValidator};
pub use shared::models::{LineRef, Span};
