//! User configuration for `kfn`.
//!
//! Loaded from the YAML file given with `--config`. Every key is optional;
//! command-line flags take precedence over the file, and the file over the
//! built-in defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! namespace: staging
//! registry: registry.example.com/team
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace used when neither the flag nor the config file names one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Registry used for images built from source when none is configured.
pub const DEFAULT_REGISTRY: &str = "dev.local";

/// Errors reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Persistent CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Namespace for created functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Image registry prefix for functions built from a git repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

impl CliConfig {
    /// Loads configuration from a YAML file. An empty file yields the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Configured namespace, or [`DEFAULT_NAMESPACE`].
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Configured registry, or [`DEFAULT_REGISTRY`].
    pub fn registry(&self) -> &str {
        self.registry.as_deref().unwrap_or(DEFAULT_REGISTRY)
    }
}
