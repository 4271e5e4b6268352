//! Quantum Cost Estimation
//!
//! Turns a set of flagged algorithm families and a problem size into a
//! classical-vs-quantum comparison priced against a hardware provider:
//! - closed-form classical iteration counts
//! - closed-form qubit / gate / iteration requirements
//! - provider pricing (per qubit, per gate, per shot)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - AlgorithmTag / AlgorithmSelection    │
//! │  - ProviderPricing / PricingTable       │
//! │  - CostEstimate (result)                │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - CostEstimator (main estimator)       │
//! │  - ComplexityCalculator (formulas)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use qscan_ir::features::cost_analysis::*;
//!
//! let estimator = CostEstimator::new(Arc::new(PricingTable::bundled()?));
//! let request = EstimateRequest::single(AlgorithmTag::Grover, 1e6, "Quantinuum");
//! let estimate = estimator.estimate(&request)?;
//! println!("speedup: {:.1}x", estimate.speedup_factor);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{CostEstimationUseCase, CostEstimationUseCaseImpl};

// Re-exports for convenience
pub use domain::{
    AlgorithmSelection, AlgorithmTag, CostEstimate, DetailedCosts, EstimateParameters,
    EstimateRequest, EstimationError, PricingTable, ProviderPricing, ResourceRequirements,
};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::{problem_size_sweep, ComplexityCalculator, CostEstimator};
