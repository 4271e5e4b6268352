//! Detect patterns use case

use crate::errors::Result;
use crate::features::parsing::application::ParseSourceUseCase;
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;
use crate::features::quantum_patterns::domain::PatternReport;
use crate::features::quantum_patterns::ports::PatternAnalyzer;

/// Parse JavaScript, then analyze the tree
pub struct DetectPatternsUseCase<P: Parser, A: PatternAnalyzer> {
    parse: ParseSourceUseCase<P>,
    analyzer: A,
}

impl<P: Parser, A: PatternAnalyzer> DetectPatternsUseCase<P, A> {
    pub fn new(parser: P, analyzer: A) -> Self {
        Self {
            parse: ParseSourceUseCase::new(parser),
            analyzer,
        }
    }

    /// Parse `source` and analyze it
    pub fn execute(&self, source: &str) -> Result<PatternReport> {
        let tree = self.parse.execute(source)?;
        self.analyze_tree(&tree)
    }

    /// Analyze an already parsed tree
    pub fn analyze_tree(&self, tree: &ParsedTree) -> Result<PatternReport> {
        self.analyzer.analyze(tree)
    }
}
