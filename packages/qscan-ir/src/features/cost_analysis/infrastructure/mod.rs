//! Infrastructure layer for cost estimation

pub mod complexity_calculator;
pub mod estimator;

pub use complexity_calculator::ComplexityCalculator;
pub use estimator::{problem_size_sweep, CostEstimator, CLASSICAL_COST_PER_ITERATION};
