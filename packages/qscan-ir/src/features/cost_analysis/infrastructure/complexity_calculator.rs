//! Complexity Calculator
//!
//! Closed-form classical and quantum cost models per algorithm family.
//! These are approximations, not simulations:
//!
//! ```text
//! algorithm | classical iterations            | qubits        | gates              | quantum iterations
//! ----------+---------------------------------+---------------+--------------------+-------------------
//! Grover    | N                               | ⌈log2N + 3⌉   | ⌈2.5·√N·log2N⌉     | ⌈π/4·√N⌉
//! Shor      | e^((lnN)^(1/3)·ln(lnN)·1.9)     | ⌈2·log2N + 2⌉ | ⌈9·log2N³⌉         | 1
//! QFT       | N·log2N                         | ⌈log2N⌉       | ⌈log2N²⌉           | 1
//! other     | N                               | ⌈log2N + 2⌉   | ⌈N⌉                | √N
//! ```
//!
//! Products are evaluated left to right exactly as written above so the
//! rounded outputs are reproducible to the last bit.

use std::f64::consts::{E, PI};

use crate::features::cost_analysis::domain::{AlgorithmTag, ResourceRequirements};

pub struct ComplexityCalculator;

impl ComplexityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Classical iteration count for one algorithm at problem size `n`
    pub fn classical_iterations(&self, algorithm: &AlgorithmTag, n: f64) -> f64 {
        match algorithm {
            AlgorithmTag::Grover => n,
            AlgorithmTag::Shor => {
                // General number field sieve heuristic complexity
                if n <= 1.0 {
                    return 1.0;
                }
                let log_n = n.ln();
                let log_log_n = (if log_n > 0.0 { log_n } else { 1.0 }).ln();
                let factor = if log_log_n > 0.0 { log_log_n } else { 1.0 };
                E.powf(log_n.powf(1.0 / 3.0) * factor * 1.9)
            }
            AlgorithmTag::Qft => {
                if n <= 1.0 {
                    return 1.0;
                }
                n * n.log2()
            }
            AlgorithmTag::Other(_) => n,
        }
    }

    /// Quantum resources for one algorithm at problem size `n`
    pub fn requirements(&self, algorithm: &AlgorithmTag, n: f64) -> ResourceRequirements {
        let log_n = (if n > 1.0 { n } else { 2.0 }).log2();

        match algorithm {
            AlgorithmTag::Grover => ResourceRequirements {
                qubits: (log_n + 3.0).ceil() as u64,
                gates: (2.5 * n.sqrt() * log_n).ceil() as u64,
                expected_iterations: (PI / 4.0 * n.sqrt()).ceil(),
            },
            AlgorithmTag::Shor => ResourceRequirements {
                qubits: (2.0 * log_n + 2.0).ceil() as u64,
                gates: (9.0 * log_n * log_n * log_n).ceil() as u64,
                expected_iterations: 1.0,
            },
            AlgorithmTag::Qft => ResourceRequirements {
                qubits: log_n.ceil() as u64,
                gates: (log_n * log_n).ceil() as u64,
                expected_iterations: 1.0,
            },
            AlgorithmTag::Other(_) => ResourceRequirements {
                qubits: (log_n + 2.0).ceil() as u64,
                gates: n.ceil() as u64,
                expected_iterations: n.sqrt(),
            },
        }
    }

    /// Mean requirements over several algorithms, each field rounded up
    ///
    /// An empty slice uses the generic model; a single algorithm is
    /// returned unchanged.
    pub fn combined_requirements(&self, algorithms: &[AlgorithmTag], n: f64) -> ResourceRequirements {
        match algorithms {
            [] => self.requirements(&AlgorithmTag::Other("default".to_string()), n),
            [only] => self.requirements(only, n),
            many => {
                let (qubits, gates, iterations) = many
                    .iter()
                    .map(|algo| self.requirements(algo, n))
                    .fold((0.0, 0.0, 0.0), |(q, g, i), r| {
                        (q + r.qubits as f64, g + r.gates as f64, i + r.expected_iterations)
                    });
                let count = many.len() as f64;

                ResourceRequirements {
                    qubits: (qubits / count).ceil() as u64,
                    gates: (gates / count).ceil() as u64,
                    expected_iterations: (iterations / count).ceil(),
                }
            }
        }
    }

    /// Mean classical iterations over several algorithms (N when empty)
    pub fn combined_classical_iterations(&self, algorithms: &[AlgorithmTag], n: f64) -> f64 {
        if algorithms.is_empty() {
            return n;
        }
        let total: f64 = algorithms
            .iter()
            .map(|algo| self.classical_iterations(algo, n))
            .sum();
        total / algorithms.len() as f64
    }
}

impl Default for ComplexityCalculator {
    fn default() -> Self {
        Self::new()
    }
}
