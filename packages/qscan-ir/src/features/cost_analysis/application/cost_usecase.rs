//! Cost Estimation UseCase

use std::sync::Arc;

use crate::features::cost_analysis::domain::{
    AlgorithmTag, CostEstimate, EstimateRequest, EstimationError, PricingTable,
};
use crate::features::cost_analysis::infrastructure::CostEstimator;

/// Cost Estimation UseCase Trait
pub trait CostEstimationUseCase: Send + Sync {
    /// Estimate an explicit request
    fn estimate(&self, request: &EstimateRequest) -> Result<CostEstimate, EstimationError>;

    /// One combined estimate over every flagged algorithm, with
    /// combined-mode defaults
    fn estimate_flagged(
        &self,
        flagged: &[AlgorithmTag],
        problem_size: f64,
        provider: &str,
    ) -> Result<CostEstimate, EstimationError> {
        self.estimate(&EstimateRequest::combined(
            flagged.to_vec(),
            problem_size,
            provider,
        ))
    }
}

/// Cost Estimation UseCase Implementation
pub struct CostEstimationUseCaseImpl {
    estimator: CostEstimator,
}

impl CostEstimationUseCaseImpl {
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        Self {
            estimator: CostEstimator::new(pricing),
        }
    }
}

impl CostEstimationUseCase for CostEstimationUseCaseImpl {
    fn estimate(&self, request: &EstimateRequest) -> Result<CostEstimate, EstimationError> {
        self.estimator.estimate(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flagged_estimate_uses_combined_defaults() {
        let usecase = CostEstimationUseCaseImpl::new(Arc::new(PricingTable::bundled().unwrap()));
        let estimate = usecase
            .estimate_flagged(
                &[AlgorithmTag::Grover, AlgorithmTag::Shor],
                1_000_000.0,
                "Quantinuum",
            )
            .unwrap();

        assert_eq!(estimate.algorithm, "Combined (Grover, Shor)");
        assert_eq!(estimate.parameters.shots, 1000);
        assert_eq!(estimate.parameters.overhead_multiplier, 1.8);
    }
}
