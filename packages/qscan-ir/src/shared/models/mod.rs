//! Shared models

mod span;

pub use span::{LineRef, Span};
