//! Service configuration
//!
//! One versioned YAML file (schema v1) describing the HTTP server, the
//! analysis pipeline, the translation service and where to find the
//! optional model and pricing artifacts. Every section has defaults, so
//! a file holding only `version: 1` is a complete configuration.
//!
//! Resolution order: explicit `--config` path, then `$QSCAN_CONFIG`, then
//! built-in defaults. `$QSCAN_BIND` (or `--bind`) overrides the bind
//! address afterwards.

use qscan_ir::config::{check_version, AnalysisConfig, ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "QSCAN_CONFIG";
pub const BIND_ENV: &str = "QSCAN_BIND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: Option<u32>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Replacement language model artifacts; the bundled model when absent
    #[serde(default)]
    pub language_model: Option<LanguageModelPaths>,

    /// Replacement pricing table; the bundled table when absent
    #[serde(default)]
    pub pricing_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Request bodies above this size are rejected
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Text-completion service used for code translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TranslatorConfig {
    /// Base URL of an OpenAI-compatible API (`/chat/completions` is appended)
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 4000,
            timeout_secs: 60,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageModelPaths {
    pub topology_path: PathBuf,
    pub weights_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: Some(1),
            server: ServerConfig::default(),
            analysis: AnalysisConfig::default(),
            translator: TranslatorConfig::default(),
            language_model: None,
            pricing_path: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: ServiceConfig = serde_yaml::from_str(content)?;
        check_version(config.version)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Resolve the configuration for the running process
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit_path.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading service configuration");
                Self::from_yaml(&path)?
            }
            None => {
                tracing::info!("no configuration file given, using defaults");
                Self::default()
            }
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.override_bind(bind)?;
        }
        Ok(config)
    }

    /// Replace the bind address, re-validating it
    pub fn override_bind(&mut self, bind: impl Into<String>) -> ConfigResult<()> {
        self.server.bind_address = bind.into();
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.server.bind_address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "invalid server.bind_address '{}': {}",
                self.server.bind_address, e
            ))
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.analysis.validate()?;
        self.socket_addr()?;

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_body_bytes must be positive".to_string(),
            ));
        }

        let translator = &self.translator;
        if !(0.0..=2.0).contains(&translator.temperature) {
            return Err(ConfigError::range_with_hint(
                "translator.temperature",
                translator.temperature,
                0.0,
                2.0,
                "Low values keep translations literal",
            ));
        }
        if translator.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "translator.timeout_secs must be positive".to_string(),
            ));
        }
        if translator.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "translator.max_tokens must be positive".to_string(),
            ));
        }
        if translator.api_key_env.trim().is_empty() {
            return Err(ConfigError::Validation(
                "translator.api_key_env must name an environment variable".to_string(),
            ));
        }

        Ok(())
    }
}
