//! Quantum pattern ports

use crate::errors::Result;
use crate::features::parsing::domain::ParsedTree;
use crate::features::quantum_patterns::domain::PatternReport;

/// Walks a syntax tree and reports quantum-relevant code shapes.
///
/// Must accept any tree the parser produces, including trees with error
/// regions. Only reads the tree.
pub trait PatternAnalyzer: Send + Sync {
    fn analyze(&self, tree: &ParsedTree) -> Result<PatternReport>;
}
