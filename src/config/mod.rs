//! Configuration management for modloader
//!
//! The loader needs almost no configuration; what exists controls logging.
//! Settings come from an optional TOML file named by `MODLOADER_CONFIG`,
//! then environment overrides.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{env_bool, env_opt};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MODLOADER_CONFIG";
/// Environment override for the log filter
pub const LOG_FILTER_ENV: &str = "MODLOADER_LOG";
/// Environment override enabling JSON log output
pub const LOG_JSON_ENV: &str = "MODLOADER_LOG_JSON";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "warn", "evmtest_modload=debug")
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,
}

/// Loader configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LoaderConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("invalid modloader configuration")
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply `MODLOADER_LOG` and `MODLOADER_LOG_JSON`
    pub fn apply_env_overrides(&mut self) {
        if let Some(filter) = env_opt(LOG_FILTER_ENV) {
            self.logging.filter = Some(filter);
        }
        if env_opt(LOG_JSON_ENV).is_some() {
            self.logging.json_format = env_bool(LOG_JSON_ENV);
        }
    }

    /// Defaults, or the file named by `MODLOADER_CONFIG`, then env overrides
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match env_opt(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }
}
