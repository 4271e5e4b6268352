//! Tree-sitter based parser implementation

mod parser;

pub use parser::{TreeSitterParser, MAX_NESTING_DEPTH};
