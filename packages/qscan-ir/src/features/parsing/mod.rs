//! Parsing Feature
//!
//! Turns JavaScript text into a typed syntax tree.
//!
//! ## Structure
//! - `domain/` - ParsedTree, SyntaxNode models, canonical printer
//! - `ports/` - Parser trait
//! - `application/` - ParseSourceUseCase
//! - `infrastructure/` - TreeSitterParser (TSX grammar lowering)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::ParseSourceUseCase;
pub use domain::{
    print_expression, BinaryOperator, LoopKind, MemberProperty, ParseError, ParsedTree,
    SyntaxKind, SyntaxNode,
};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::{TreeSitterParser, MAX_NESTING_DEPTH};
pub use ports::Parser;
