//! Parsing domain models

mod parsed_tree;
mod printer;
mod syntax_node;

pub use parsed_tree::{ParseError, ParsedTree};
pub use printer::print_expression;
pub use syntax_node::{
    BinaryOperator, Descendants, LoopKind, MemberProperty, SyntaxKind, SyntaxNode,
};
