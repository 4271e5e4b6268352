//! Configuration I/O (YAML loading)
//!
//! Defines the on-disk schema for the provider pricing table and the
//! loader used at process start. A copy of the table ships inside the
//! binary so the service runs without any files on disk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use crate::features::cost_analysis::domain::{PricingTable, ProviderPricing};

/// Bundled pricing table (YAML, schema v1)
pub const BUNDLED_PRICING_YAML: &str = include_str!("../../config/quantum_pricing.yaml");

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Pricing file schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Provider name -> per-unit prices
    pub providers: BTreeMap<String, ProviderPricing>,
}

/// Check a schema version field shared by every YAML file we read
pub fn check_version(version: Option<u32>) -> ConfigResult<()> {
    match version {
        None => Err(ConfigError::MissingVersion),
        Some(v) if SUPPORTED_VERSIONS.contains(&v) => Ok(()),
        Some(v) => Err(ConfigError::UnsupportedVersion {
            found: v,
            supported: SUPPORTED_VERSIONS.to_vec(),
        }),
    }
}

impl PricingTable {
    /// Parse a pricing table from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: PricingFileV1 = serde_yaml::from_str(content)?;
        check_version(file.version)?;

        for (name, pricing) in &file.providers {
            pricing.validate().map_err(|msg| {
                ConfigError::Validation(format!("provider '{}': {}", name, msg))
            })?;
        }

        Ok(PricingTable::new(file.providers))
    }

    /// Load a pricing table from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// The table compiled into the binary
    pub fn bundled() -> ConfigResult<Self> {
        Self::from_yaml_str(BUNDLED_PRICING_YAML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bundled_table_has_known_providers() {
        let table = PricingTable::bundled().unwrap();
        for name in ["Quantinuum", "IonQ Aria", "Rigetti Ankaa"] {
            assert!(table.get(name).is_some(), "missing provider {}", name);
        }
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
providers:
  Local:
    pricePerQubit: 0.5
    pricePerGate: 0.25
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let table = PricingTable::from_yaml(temp_file.path()).unwrap();
        let local = table.get("Local").unwrap();
        assert_eq!(local.price_per_qubit, 0.5);
        assert_eq!(local.price_per_gate, 0.25);
        assert_eq!(local.price_per_shot, 0.0);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = PricingTable::from_yaml_str("providers: {}\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = PricingTable::from_yaml_str("version: 2\nproviders: {}\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let yaml = "version: 1\nproviders:\n  Bad:\n    pricePerQubit: -1\n    pricePerGate: 0\n";
        assert!(matches!(
            PricingTable::from_yaml_str(yaml),
            Err(ConfigError::Validation(_))
        ));
    }
}
