//! Source location types
//!
//! These types represent positions in source code. Lines are 1-based,
//! columns are 0-based byte offsets within the line (tree-sitter convention).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Span in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn line_count(&self) -> u32 {
        if self.end_line >= self.start_line {
            self.end_line - self.start_line + 1
        } else {
            0
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

/// Best-available line number for a finding.
///
/// Nodes synthesized by error recovery carry no position; they render as
/// `unknown`, the same marker the report uses everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineRef {
    Line(u32),
    Unknown,
}

impl LineRef {
    pub fn of(span: Option<&Span>) -> Self {
        match span {
            Some(span) if span.start_line > 0 => LineRef::Line(span.start_line),
            _ => LineRef::Unknown,
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            LineRef::Line(line) => Some(*line),
            LineRef::Unknown => None,
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Line(line) => write!(f, "{}", line),
            LineRef::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_line() {
        let span = Span::new(10, 0, 20, 0);
        assert!(span.contains_line(10));
        assert!(span.contains_line(15));
        assert!(span.contains_line(20));
        assert!(!span.contains_line(9));
        assert!(!span.contains_line(21));
    }

    #[test]
    fn test_span_line_count() {
        let span = Span::new(10, 0, 20, 0);
        assert_eq!(span.line_count(), 11);
    }

    #[test]
    fn test_line_ref_renders_unknown_for_missing_span() {
        assert_eq!(LineRef::of(None).to_string(), "unknown");
        assert_eq!(LineRef::of(Some(&Span::zero())).to_string(), "unknown");
        assert_eq!(LineRef::of(Some(&Span::new(7, 2, 7, 9))).to_string(), "7");
    }
}
