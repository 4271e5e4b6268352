//! Configuration System
//!
//! Two kinds of configuration live here:
//! - `AnalysisConfig`: per-request pipeline knobs (embedded in the service
//!   config under `analysis:`)
//! - the provider pricing table, a versioned YAML file loaded once at start
//!
//! # Examples
//!
//! ```rust,ignore
//! use qscan_ir::config::AnalysisConfig;
//! use qscan_ir::features::cost_analysis::PricingTable;
//!
//! let analysis = AnalysisConfig::default();
//! let pricing = PricingTable::from_yaml("pricing.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;

// Re-exports
pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::{check_version, PricingFileV1, BUNDLED_PRICING_YAML};
