//! Parse source use case

use crate::errors::Result;
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;

/// Parse source use case
pub struct ParseSourceUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseSourceUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Execute the parse operation
    pub fn execute(&self, source: &str) -> Result<ParsedTree> {
        let tree = self.parser.parse(source)?;
        tracing::debug!(
            language = self.parser.language_name(),
            nodes = tree.root.node_count(),
            recovered_errors = tree.errors.len(),
            "parsed source"
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QscanError;
    use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};

    // Mock parser for testing
    struct MockParser {
        fail: bool,
    }

    impl Parser for MockParser {
        fn parse(&self, source: &str) -> Result<ParsedTree> {
            if self.fail {
                return Err(QscanError::parse("Unexpected token (1:0)"));
            }
            let root = SyntaxNode::new(SyntaxKind::Program { body: vec![] }, None, 0..source.len());
            Ok(ParsedTree::new(root, source.to_string(), "jsx".to_string()))
        }

        fn language_name(&self) -> &'static str {
            "jsx"
        }
    }

    #[test]
    fn test_parse_source_use_case() {
        let use_case = ParseSourceUseCase::new(MockParser { fail: false });
        let tree = use_case.execute("function f() {}").unwrap();
        assert_eq!(tree.language, "jsx");
    }

    #[test]
    fn test_parse_failure_propagates() {
        let use_case = ParseSourceUseCase::new(MockParser { fail: true });
        let err = use_case.execute("}}}").unwrap_err();
        assert!(err.is_syntax());
    }
}
