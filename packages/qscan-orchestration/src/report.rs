//! Analysis report (the 200 response body)

use qscan_ir::{CostEstimate, Finding, LanguageId, PatternReport};
use rand::Rng;
use serde::Serialize;

/// Display-only score, drawn independently of the structural findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvantageScore(u8);

impl AdvantageScore {
    /// Uniform in 0..=99
    pub fn roll() -> Self {
        Self(rand::thread_rng().gen_range(0..100))
    }

    pub fn from_value(value: u8) -> Self {
        Self(value.min(99))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn quantum_advantage(&self) -> bool {
        self.0 > 50
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub quantum_advantage: bool,
    pub score: u8,
    pub detected_language: LanguageId,
    pub conversion_required: bool,
    pub quantum_speedup_potential: bool,
    pub grover_potential: bool,
    /// Grover findings (historical field name)
    pub potential_findings: Vec<String>,
    pub shor_potential: bool,
    pub shor_findings: Vec<String>,
    pub qft_potential: bool,
    pub qft_findings: Vec<String>,
    pub cost_estimates: Vec<CostEstimate>,
}

impl AnalysisReport {
    pub fn assemble(
        detected_language: LanguageId,
        conversion_required: bool,
        patterns: PatternReport,
        cost_estimates: Vec<CostEstimate>,
        score: AdvantageScore,
    ) -> Self {
        Self {
            quantum_advantage: score.quantum_advantage(),
            score: score.value(),
            detected_language,
            conversion_required,
            quantum_speedup_potential: patterns.quantum_speedup_potential(),
            grover_potential: patterns.grover_potential,
            potential_findings: messages(patterns.grover_findings),
            shor_potential: patterns.shor_potential,
            shor_findings: messages(patterns.shor_findings),
            qft_potential: patterns.qft_potential,
            qft_findings: messages(patterns.qft_findings),
            cost_estimates,
        }
    }
}

fn messages(findings: Vec<Finding>) -> Vec<String> {
    findings.into_iter().map(|f| f.message).collect()
}
