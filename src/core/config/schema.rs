//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: repository names must be
//! valid [`RepoName`]s that a shell line can name as one token, and the
//! default history count must be positive.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::RepoName;

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// repositories = ["main", "upstream"]
///
/// [shell]
/// prompt = "mgit> "
/// echo = false
///
/// [history]
/// default_count = 5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repositories created when a shell session starts
    pub repositories: Option<Vec<String>>,

    /// Interactive shell settings
    pub shell: Option<ShellConfig>,

    /// History command defaults
    pub history: Option<HistoryConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repos) = &self.repositories {
            for name in repos {
                let parsed = RepoName::new(name.as_str()).map_err(|e| {
                    ConfigError::InvalidValue(format!("repositories: {e}"))
                })?;
                if !parsed.is_single_token() {
                    return Err(ConfigError::InvalidValue(format!(
                        "repositories: '{name}' contains whitespace and cannot be used from the shell"
                    )));
                }
            }
            let mut sorted: Vec<_> = repos.iter().collect();
            sorted.sort();
            if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
                return Err(ConfigError::InvalidValue(format!(
                    "repositories: '{}' listed more than once",
                    pair[0]
                )));
            }
        }

        if let Some(history) = &self.history {
            if history.default_count == Some(0) {
                return Err(ConfigError::InvalidValue(
                    "history.default_count must be greater than 0".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Interactive shell settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Prompt shown before each command in interactive sessions
    pub prompt: Option<String>,

    /// Echo each command before running it
    pub echo: Option<bool>,
}

/// History command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Number of commits shown when `history` is given no count
    pub default_count: Option<usize>,
}
