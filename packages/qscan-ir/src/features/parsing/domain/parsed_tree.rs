//! Parsed tree representation
//!
//! Abstracts the parsed AST for downstream processing. Built once per
//! request and only ever read afterwards.

use super::syntax_node::{SyntaxKind, SyntaxNode};
use crate::shared::models::Span;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree (always `SyntaxKind::Program`)
    pub root: SyntaxNode,

    /// Source code
    pub source: String,

    /// Grammar used ("jsx")
    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Parse errors recovered from (if any)
    pub errors: Vec<ParseError>,
}

/// Recovered parse error
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, source: String, language: String) -> Self {
        Self {
            root,
            source,
            language,
            has_errors: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.has_errors = !errors.is_empty();
        self.errors = errors;
        self
    }

    /// Top-level statements the parser understood
    pub fn recovered_statements(&self) -> usize {
        match &self.root.kind {
            SyntaxKind::Program { body } => body.iter().filter(|n| !n.is_error()).count(),
            _ => 0,
        }
    }
}
