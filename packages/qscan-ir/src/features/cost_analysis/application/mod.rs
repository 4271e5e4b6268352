//! Application layer for cost estimation

mod cost_usecase;

pub use cost_usecase::{CostEstimationUseCase, CostEstimationUseCaseImpl};
