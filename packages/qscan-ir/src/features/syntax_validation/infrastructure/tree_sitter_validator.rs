//! Strict tree-sitter pre-check
//!
//! Parses the text with the same TSX grammar the analyzer uses, but accepts
//! nothing the grammar had to recover from: the first ERROR or MISSING node
//! in document order is reported as the offending token.

use tree_sitter::{Node, Parser as TSParser};

use crate::features::syntax_validation::domain::SyntaxErrorDetail;
use crate::features::syntax_validation::ports::SyntaxValidator;

/// Rejects any text the grammar cannot parse without error recovery
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterValidator;

impl TreeSitterValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxValidator for TreeSitterValidator {
    fn validate(&self, code: &str) -> Result<(), SyntaxErrorDetail> {
        let mut parser = TSParser::new();
        if let Err(e) = parser.set_language(&tree_sitter_typescript::language_tsx()) {
            // Not a property of the text; the parser stage reports it
            tracing::warn!(error = %e, "syntax pre-check unavailable");
            return Ok(());
        }
        let Some(tree) = parser.parse(code, None) else {
            tracing::warn!("syntax pre-check produced no tree");
            return Ok(());
        };

        match first_error(tree.root_node()) {
            Some(node) => Err(describe(code, node.start_byte())),
            None => Ok(()),
        }
    }
}

/// First ERROR or MISSING node in document order, without recursion
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // Only subtrees that contain an error are worth entering
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Name the token at (or after) `offset` and give its 1-based position
fn describe(code: &str, offset: usize) -> SyntaxErrorDetail {
    let rest = code.get(offset..).unwrap_or("");
    let skipped = rest.len() - rest.trim_start().len();
    let at = offset + skipped;
    let (line, column) = position(code, at);

    let tail = &rest[skipped..];
    let Some(first) = tail.chars().next() else {
        return SyntaxErrorDetail::unexpected_end(line, column);
    };
    let token = if is_word_char(first) {
        let end = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
        &tail[..end]
    } else {
        &tail[..first.len_utf8()]
    };
    SyntaxErrorDetail::unexpected_token(token, line, column)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// 1-based line and character column of a byte offset
fn position(code: &str, offset: usize) -> (u32, u32) {
    let before = code.get(..offset).unwrap_or(code);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line as u32, column as u32)
}
