//! Domain models for quantum cost estimation
//!
//! Pure data with no external dependencies beyond serde. All monetary
//! amounts are in the pricing table's currency (USD in the bundled table).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Algorithm family a finding or estimate refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlgorithmTag {
    /// Unstructured search (quadratic speedup)
    Grover,
    /// Factoring / period finding
    Shor,
    /// Quantum Fourier Transform
    Qft,
    /// Anything else; estimated with the generic model
    Other(String),
}

impl AlgorithmTag {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Grover => "Grover",
            Self::Shor => "Shor",
            Self::Qft => "QFT",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for AlgorithmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Grover" => Self::Grover,
            "Shor" => Self::Shor,
            "QFT" => Self::Qft,
            other => Self::Other(other.to_string()),
        })
    }
}

impl Serialize for AlgorithmTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AlgorithmTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AlgorithmTag::from_str(&raw).unwrap_or_else(|never| match never {}))
    }
}

/// One algorithm, or several estimated together
///
/// Combined mode averages the individually computed values; it is not a
/// joint model of running the algorithms together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlgorithmSelection {
    Single(AlgorithmTag),
    Combined(Vec<AlgorithmTag>),
}

impl AlgorithmSelection {
    /// Display label, e.g. `Grover` or `Combined (Grover, Shor)`
    pub fn label(&self) -> String {
        match self {
            Self::Single(tag) => tag.to_string(),
            Self::Combined(tags) => format!(
                "Combined ({})",
                tags.iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Algorithms actually considered (`None` for an empty combination)
    pub fn involved(&self) -> Vec<String> {
        match self {
            Self::Single(tag) => vec![tag.to_string()],
            Self::Combined(tags) if tags.is_empty() => vec!["None".to_string()],
            Self::Combined(tags) => tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Per-provider prices, read-only after load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProviderPricing {
    pub price_per_qubit: f64,
    pub price_per_gate: f64,
    #[serde(default)]
    pub price_per_shot: f64,
}

impl ProviderPricing {
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("pricePerQubit", self.price_per_qubit),
            ("pricePerGate", self.price_per_gate),
            ("pricePerShot", self.price_per_shot),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite non-negative number", field));
            }
        }
        Ok(())
    }
}

/// Provider name -> pricing
///
/// Loaded once at start and shared behind an `Arc`; never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    providers: BTreeMap<String, ProviderPricing>,
}

impl PricingTable {
    pub fn new(providers: BTreeMap<String, ProviderPricing>) -> Self {
        Self { providers }
    }

    pub fn get(&self, provider: &str) -> Option<&ProviderPricing> {
        self.providers.get(provider)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Quantum resources needed for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    pub qubits: u64,
    pub gates: u64,
    /// Not always integral: the generic model uses `sqrt(N)` as is
    pub expected_iterations: f64,
}

/// Inputs for one estimate
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRequest {
    pub algorithms: AlgorithmSelection,
    pub problem_size: f64,
    pub provider: String,
    pub shots: u32,
    pub overhead_multiplier: f64,
}

/// Default shots for a single-algorithm estimate
pub const SINGLE_DEFAULT_SHOTS: u32 = 50;
/// Default overhead for a single-algorithm estimate
pub const SINGLE_DEFAULT_OVERHEAD: f64 = 1.5;
/// Default shots for a combined estimate
pub const COMBINED_DEFAULT_SHOTS: u32 = 1000;
/// Default overhead for a combined estimate
pub const COMBINED_DEFAULT_OVERHEAD: f64 = 1.8;

impl EstimateRequest {
    /// Single algorithm with single-mode defaults (50 shots, 1.5x overhead)
    pub fn single(tag: AlgorithmTag, problem_size: f64, provider: impl Into<String>) -> Self {
        Self {
            algorithms: AlgorithmSelection::Single(tag),
            problem_size,
            provider: provider.into(),
            shots: SINGLE_DEFAULT_SHOTS,
            overhead_multiplier: SINGLE_DEFAULT_OVERHEAD,
        }
    }

    /// Several algorithms with combined-mode defaults (1000 shots, 1.8x overhead)
    pub fn combined(
        tags: Vec<AlgorithmTag>,
        problem_size: f64,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            algorithms: AlgorithmSelection::Combined(tags),
            problem_size,
            provider: provider.into(),
            shots: COMBINED_DEFAULT_SHOTS,
            overhead_multiplier: COMBINED_DEFAULT_OVERHEAD,
        }
    }

    pub fn with_problem_size(mut self, problem_size: f64) -> Self {
        self.problem_size = problem_size;
        self
    }
}

/// Cost breakdown for one circuit run and for all shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCosts {
    pub qubit_cost: f64,
    pub gate_cost: f64,
    pub shot_cost: f64,
    pub cost_per_shot: f64,
}

/// Echo of the inputs that produced an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateParameters {
    pub n: f64,
    pub provider: String,
    pub overhead_multiplier: f64,
    pub shots: u32,
}

/// Classical vs quantum comparison for one selection of algorithms
///
/// Entirely derived from the request and the pricing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub algorithm: String,
    pub algorithms_involved: Vec<String>,
    pub classical_iterations: f64,
    pub quantum_iterations: f64,
    pub speedup_factor: f64,
    pub resources: ResourceRequirements,
    pub estimated_quantum_cost: f64,
    pub classical_cost: f64,
    pub cost_savings: f64,
    pub is_worth_it: bool,
    pub provider: String,
    pub provider_info: ProviderPricing,
    pub detailed_costs: DetailedCosts,
    pub parameters: EstimateParameters,
}

/// Estimation failures; never fatal to an analysis request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("Provider {0} not found in pricing configuration.")]
    UnknownProvider(String),

    #[error("Estimate produced a non-finite {quantity}")]
    NonFinite { quantity: &'static str },

    #[error("Invalid estimate parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_labels() {
        let single = AlgorithmSelection::Single(AlgorithmTag::Qft);
        assert_eq!(single.label(), "QFT");
        assert_eq!(single.involved(), vec!["QFT"]);

        let combined =
            AlgorithmSelection::Combined(vec![AlgorithmTag::Grover, AlgorithmTag::Shor]);
        assert_eq!(combined.label(), "Combined (Grover, Shor)");

        let empty = AlgorithmSelection::Combined(vec![]);
        assert_eq!(empty.involved(), vec!["None"]);
    }

    #[test]
    fn test_tag_parse_keeps_unknown_name() {
        assert_eq!("QFT".parse::<AlgorithmTag>().unwrap(), AlgorithmTag::Qft);
        assert_eq!(
            "VQE".parse::<AlgorithmTag>().unwrap(),
            AlgorithmTag::Other("VQE".to_string())
        );
    }

    #[test]
    fn test_request_defaults_per_mode() {
        let single = EstimateRequest::single(AlgorithmTag::Grover, 10.0, "Quantinuum");
        assert_eq!(single.shots, 50);
        assert_eq!(single.overhead_multiplier, 1.5);

        let combined = EstimateRequest::combined(vec![AlgorithmTag::Grover], 10.0, "Quantinuum");
        assert_eq!(combined.shots, 1000);
        assert_eq!(combined.overhead_multiplier, 1.8);
    }
}
