//! Parser port (interface)
//!
//! Defines the contract for parsing source code.

use crate::errors::Result;
use crate::features::parsing::domain::ParsedTree;

/// Parser trait - abstraction over parsing implementation
pub trait Parser: Send + Sync {
    /// Parse JavaScript (JSX allowed) into a ParsedTree.
    ///
    /// Recoverable syntax problems stay inside the tree as `Error` nodes;
    /// an `Err` means no program could be recovered at all.
    fn parse(&self, source: &str) -> Result<ParsedTree>;

    /// Get grammar name
    fn language_name(&self) -> &'static str;
}
