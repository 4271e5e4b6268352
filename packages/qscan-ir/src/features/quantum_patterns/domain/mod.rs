//! Quantum pattern domain models

mod finding;
mod report;

pub use finding::{Finding, PatternKind};
pub use report::PatternReport;
