//! Cost Estimator
//!
//! Main entry point for cost estimation.
//!
//! Algorithm:
//! 1. Clamp the problem size (N ≤ 0 or NaN becomes 1)
//! 2. Resource requirements + classical iterations (ComplexityCalculator)
//! 3. Apply the quantum overhead multiplier
//! 4. Price the run against the provider table
//! 5. Compare with the classical baseline

use rayon::prelude::*;
use std::sync::Arc;

use crate::features::cost_analysis::domain::{
    AlgorithmSelection, CostEstimate, DetailedCosts, EstimateParameters, EstimateRequest,
    EstimationError, PricingTable,
};
use crate::features::cost_analysis::infrastructure::complexity_calculator::ComplexityCalculator;

/// Cost of one classical iteration, in pricing-table currency
pub const CLASSICAL_COST_PER_ITERATION: f64 = 0.00001;

/// Cost Estimator
///
/// Holds a shared, read-only pricing table; safe to use from any number of
/// threads at once.
pub struct CostEstimator {
    complexity_calc: ComplexityCalculator,
    pricing: Arc<PricingTable>,
}

impl CostEstimator {
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        tracing::debug!("cost_estimator_initialized (providers={})", pricing.len());

        Self {
            complexity_calc: ComplexityCalculator::new(),
            pricing,
        }
    }

    /// Estimate cost and speedup for one request
    pub fn estimate(&self, request: &EstimateRequest) -> Result<CostEstimate, EstimationError> {
        let n = clamp_problem_size(request.problem_size);

        if !request.overhead_multiplier.is_finite() || request.overhead_multiplier < 0.0 {
            return Err(EstimationError::InvalidParameter(format!(
                "overhead multiplier must be finite and non-negative, got {}",
                request.overhead_multiplier
            )));
        }

        let (resources, classical_iterations) = match &request.algorithms {
            AlgorithmSelection::Single(tag) => (
                self.complexity_calc.requirements(tag, n),
                self.complexity_calc.classical_iterations(tag, n),
            ),
            AlgorithmSelection::Combined(tags) => (
                self.complexity_calc.combined_requirements(tags, n),
                self.complexity_calc.combined_classical_iterations(tags, n),
            ),
        };
        let classical_iterations = classical_iterations.max(1.0);

        let quantum_iterations = (resources.expected_iterations * request.overhead_multiplier).max(1.0);
        let speedup_factor = classical_iterations / quantum_iterations;

        let provider_info = *self
            .pricing
            .get(&request.provider)
            .ok_or_else(|| EstimationError::UnknownProvider(request.provider.clone()))?;

        let shots = f64::from(request.shots);
        let qubit_cost = resources.qubits as f64 * provider_info.price_per_qubit;
        let gate_cost = resources.gates as f64 * provider_info.price_per_gate;
        let cost_per_shot = qubit_cost + gate_cost;
        let estimated_quantum_cost = cost_per_shot * shots + shots * provider_info.price_per_shot;

        let classical_cost = classical_iterations * CLASSICAL_COST_PER_ITERATION;
        let cost_savings = classical_cost - estimated_quantum_cost;
        let is_worth_it = speedup_factor > 1.0 && cost_savings > 0.0;

        for (quantity, value) in [
            ("classical iteration count", classical_iterations),
            ("quantum iteration count", quantum_iterations),
            ("speedup factor", speedup_factor),
            ("quantum cost", estimated_quantum_cost),
            ("classical cost", classical_cost),
        ] {
            if !value.is_finite() {
                return Err(EstimationError::NonFinite { quantity });
            }
        }

        tracing::debug!(
            "Cost estimate: {} on {} (N={}) speedup={:.3} savings={:.5}",
            request.algorithms.label(),
            request.provider,
            n,
            speedup_factor,
            cost_savings
        );

        Ok(CostEstimate {
            algorithm: request.algorithms.label(),
            algorithms_involved: request.algorithms.involved(),
            classical_iterations,
            quantum_iterations,
            speedup_factor,
            resources,
            estimated_quantum_cost,
            classical_cost,
            cost_savings,
            is_worth_it,
            provider: request.provider.clone(),
            provider_info,
            detailed_costs: DetailedCosts {
                qubit_cost,
                gate_cost,
                shot_cost: shots * provider_info.price_per_shot,
                cost_per_shot: cost_per_shot + provider_info.price_per_shot,
            },
            parameters: EstimateParameters {
                n: request.problem_size,
                provider: request.provider.clone(),
                overhead_multiplier: request.overhead_multiplier,
                shots: request.shots,
            },
        })
    }

    /// Estimate the same request at several problem sizes (order preserved)
    pub fn estimate_batch(
        &self,
        request: &EstimateRequest,
        sizes: &[f64],
    ) -> Vec<Result<CostEstimate, EstimationError>> {
        sizes
            .par_iter()
            .map(|&size| self.estimate(&request.clone().with_problem_size(size)))
            .collect()
    }
}

/// N ≤ 0 (and NaN) would make the square roots and logarithms non-finite
fn clamp_problem_size(n: f64) -> f64 {
    if n > 0.0 {
        n
    } else {
        1.0
    }
}

/// Log-spaced problem sizes from 100 up to `initial × 10 000`
///
/// Returns `points + 1` rounded sizes, endpoints included.
pub fn problem_size_sweep(initial: f64, points: usize) -> Vec<f64> {
    let min_size: f64 = 100.0;
    let max_size = initial * 10_000.0;
    if points == 0 {
        return vec![min_size];
    }

    (0..=points)
        .map(|i| {
            let t = i as f64 / points as f64;
            (min_size.ln() + (max_size.ln() - min_size.ln()) * t)
                .exp()
                .round()
        })
        .collect()
}
