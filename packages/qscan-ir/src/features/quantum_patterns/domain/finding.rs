//! Findings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::features::cost_analysis::domain::AlgorithmTag;
use crate::shared::models::LineRef;

/// Which heuristic produced a finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternKind {
    /// Function name mentions fourier / fft / dft / qft
    FourierName,
    /// Function name mentions factor / prime / divisor / gcd
    FactorName,
    /// `Math.<method>(... 2 * Math.PI ...)` two loops deep
    NestedTrigLoop { method: String },
    /// `x % y === 0` inside a loop
    ModuloCheck,
    /// Equality against a member access inside a loop
    SearchLoopCompare,
    /// `.find` / `.filter` / `.indexOf` / `.includes`
    ArraySearchMethod { method: String },
}

impl PatternKind {
    pub fn algorithm(&self) -> AlgorithmTag {
        match self {
            PatternKind::FourierName | PatternKind::NestedTrigLoop { .. } => AlgorithmTag::Qft,
            PatternKind::FactorName | PatternKind::ModuloCheck => AlgorithmTag::Shor,
            PatternKind::SearchLoopCompare | PatternKind::ArraySearchMethod { .. } => {
                AlgorithmTag::Grover
            }
        }
    }
}

/// One observation tying a source line to a suspected algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: PatternKind,

    /// Enclosing function name, `anonymous` when it has none
    pub function: String,

    pub line: LineRef,

    /// Human-readable text shown to users
    pub message: String,
}

impl Finding {
    pub fn new(kind: PatternKind, function: impl Into<String>, line: LineRef) -> Self {
        let function = function.into();
        let message = match &kind {
            PatternKind::FourierName => format!(
                "Function name suggests Fourier transform: {} (line {})",
                function, line
            ),
            PatternKind::FactorName => format!(
                "Function name suggests factorization/primality testing: {} (line {})",
                function, line
            ),
            PatternKind::NestedTrigLoop { method } => format!(
                "Potential QFT pattern (nested loop with Math.{} using 2*PI) in function: {} (around line {})",
                method, function, line
            ),
            PatternKind::ModuloCheck => format!(
                "Potential modulo-based factor check found in function: {} (around line {})",
                function, line
            ),
            PatternKind::SearchLoopCompare => format!(
                "Potential search loop comparing element found in function: {} (line {})",
                function, line
            ),
            PatternKind::ArraySearchMethod { method } => format!(
                "Potential array search method (.{}) in function: {} (line {})",
                method, function, line
            ),
        };

        Self {
            kind,
            function,
            line,
            message,
        }
    }

    pub fn algorithm(&self) -> AlgorithmTag {
        self.kind.algorithm()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let f = Finding::new(
            PatternKind::ArraySearchMethod {
                method: "find".into(),
            },
            "search",
            LineRef::Line(1),
        );
        assert_eq!(
            f.message,
            "Potential array search method (.find) in function: search (line 1)"
        );
        assert_eq!(f.algorithm(), AlgorithmTag::Grover);

        let f = Finding::new(PatternKind::ModuloCheck, "isPrime", LineRef::Unknown);
        assert_eq!(
            f.to_string(),
            "Potential modulo-based factor check found in function: isPrime (around line unknown)"
        );
    }

    #[test]
    fn test_trig_message() {
        let f = Finding::new(
            PatternKind::NestedTrigLoop {
                method: "cos".into(),
            },
            "qft",
            LineRef::Line(4),
        );
        assert_eq!(
            f.message,
            "Potential QFT pattern (nested loop with Math.cos using 2*PI) in function: qft (around line 4)"
        );
        assert_eq!(f.algorithm(), AlgorithmTag::Qft);
    }
}
