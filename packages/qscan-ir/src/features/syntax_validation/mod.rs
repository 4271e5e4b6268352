//! Syntax Pre-check
//!
//! Fails fast with a precise message when the text is not valid JavaScript.
//! The check is strict where the parser is forgiving: anything the grammar
//! can only read through error recovery is rejected with the position of the
//! first offending token. JSX and ES module syntax pass.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::SyntaxErrorDetail;
pub use infrastructure::TreeSitterValidator;
pub use ports::SyntaxValidator;
