//! Quantum Pattern Detection
//!
//! Three independent heuristics over the typed syntax tree:
//! - Grover (unstructured search): array search methods, loop comparisons
//!   against member accesses
//! - Shor (factoring): function names, `x % y === 0` inside loops
//! - QFT: function names, `Math.exp/cos/sin` with a `2 * Math.PI` argument
//!   two loops deep
//!
//! Findings keep traversal order, so analyzing the same tree twice yields
//! identical reports.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::DetectPatternsUseCase;
pub use domain::{Finding, PatternKind, PatternReport};
pub use infrastructure::AstPatternAnalyzer;
pub use ports::PatternAnalyzer;
