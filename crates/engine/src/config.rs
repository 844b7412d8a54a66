//! Navigator configuration.
//!
//! Every field has a default, so an empty YAML/JSON document (or no file at
//! all) yields the stock behaviour. `SUBSTEP_CONFIG_PATH` points [`SubstepConfig::load`]
//! at a file.

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};
use substep_types::PrevMode;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "SUBSTEP_CONFIG_PATH";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// What to do when a conceal hides the first group of a step that
/// auto-activates its first group on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustedConceal {
    /// Leave the step fully hidden.
    #[default]
    NoOp,
    /// Re-derive the restart baseline: first group visible and active.
    Restart,
}

/// Tunables for [`SubstepNavigator`](crate::SubstepNavigator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SubstepConfig {
    /// Backward policy for steps that do not pick one.
    pub default_prev_mode: PrevMode,
    /// Handling of a conceal that empties an auto-activating step.
    pub exhausted_conceal: ExhaustedConceal,
}

impl SubstepConfig {
    pub fn with_default_prev_mode(mut self, prev_mode: PrevMode) -> Self {
        self.default_prev_mode = prev_mode;
        self
    }

    pub fn with_exhausted_conceal(mut self, policy: ExhaustedConceal) -> Self {
        self.exhausted_conceal = policy;
        self
    }

    /// Parses YAML (or JSON, which is a YAML subset).
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Loads the file named by [`CONFIG_PATH_ENV`], falling back to defaults
    /// when the variable is unset or the file cannot be used.
    pub fn load() -> Self {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Self::default();
        };
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match Self::from_path(trimmed) {
            Ok(config) => config,
            Err(error) => {
                warn!(path = trimmed, error = %error, "Failed to load substep config; using defaults");
                Self::default()
            }
        }
    }
}
