//! Syntax validation infrastructure

mod tree_sitter_validator;

pub use tree_sitter_validator::TreeSitterValidator;
