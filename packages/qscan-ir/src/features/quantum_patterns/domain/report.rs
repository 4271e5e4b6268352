//! Pattern report

use serde::{Deserialize, Serialize};

use super::finding::Finding;
use crate::features::cost_analysis::domain::AlgorithmTag;

/// Result of one analysis pass.
///
/// Per-algorithm flags only ever go from false to true, and each finding
/// list keeps traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternReport {
    pub grover_potential: bool,
    pub grover_findings: Vec<Finding>,
    pub shor_potential: bool,
    pub shor_findings: Vec<Finding>,
    pub qft_potential: bool,
    pub qft_findings: Vec<Finding>,
}

impl PatternReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding and raise its algorithm's flag
    pub fn record(&mut self, finding: Finding) {
        match finding.algorithm() {
            AlgorithmTag::Grover => {
                self.grover_potential = true;
                self.grover_findings.push(finding);
            }
            AlgorithmTag::Shor => {
                self.shor_potential = true;
                self.shor_findings.push(finding);
            }
            AlgorithmTag::Qft => {
                self.qft_potential = true;
                self.qft_findings.push(finding);
            }
            AlgorithmTag::Other(tag) => {
                tracing::debug!(%tag, "finding for untracked algorithm ignored");
            }
        }
    }

    /// Any algorithm flagged
    pub fn quantum_speedup_potential(&self) -> bool {
        self.grover_potential || self.shor_potential || self.qft_potential
    }

    /// Flagged algorithms in fixed order: Grover, Shor, QFT
    pub fn flagged_algorithms(&self) -> Vec<AlgorithmTag> {
        [
            (self.grover_potential, AlgorithmTag::Grover),
            (self.shor_potential, AlgorithmTag::Shor),
            (self.qft_potential, AlgorithmTag::Qft),
        ]
        .into_iter()
        .filter_map(|(flagged, tag)| flagged.then_some(tag))
        .collect()
    }

    pub fn findings_for(&self, algorithm: &AlgorithmTag) -> &[Finding] {
        match algorithm {
            AlgorithmTag::Grover => &self.grover_findings,
            AlgorithmTag::Shor => &self.shor_findings,
            AlgorithmTag::Qft => &self.qft_findings,
            AlgorithmTag::Other(_) => &[],
        }
    }

    pub fn finding_count(&self) -> usize {
        self.grover_findings.len() + self.shor_findings.len() + self.qft_findings.len()
    }
}
