//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! An explicit `--config <path>` wins. Otherwise searched in order:
//! 1. `$MGIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/mgit/config.toml`
//! 3. `~/.mgit/config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use minigit::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("prompt: {:?}", config.prompt());
//! println!("history count: {}", config.history_count());
//! ```

pub mod schema;

pub use schema::{FileConfig, HistoryConfig, ShellConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Where the file came from (if one was found)
    path: Option<PathBuf>,
}

impl Config {
    const DEFAULT_PROMPT: &'static str = "mgit> ";
    const DEFAULT_HISTORY_COUNT: usize = 5;

    /// Load configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the standard
    /// locations are searched and defaults are used if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let Some(path) = path else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        tracing::debug!(path = %path.display(), "loading config");
        let file = Self::read_file(&path)?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// Configuration from already parsed file contents.
    pub fn from_file(file: FileConfig) -> Self {
        Self { file, path: None }
    }

    /// Find the first existing config file in the standard locations.
    fn discover() -> Option<PathBuf> {
        // 1. Check $MGIT_CONFIG
        if let Ok(path) = std::env::var("MGIT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/mgit/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("mgit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.mgit/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".mgit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The file this configuration was read from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Shell prompt.
    pub fn prompt(&self) -> &str {
        self.file
            .shell
            .as_ref()
            .and_then(|s| s.prompt.as_deref())
            .unwrap_or(Self::DEFAULT_PROMPT)
    }

    /// Whether the shell echoes commands before running them.
    pub fn echo(&self) -> bool {
        self.file
            .shell
            .as_ref()
            .and_then(|s| s.echo)
            .unwrap_or(false)
    }

    /// Count used by `history` when none is given.
    pub fn history_count(&self) -> usize {
        self.file
            .history
            .as_ref()
            .and_then(|h| h.default_count)
            .unwrap_or(Self::DEFAULT_HISTORY_COUNT)
    }

    /// Repositories to create at shell start.
    pub fn repositories(&self) -> &[String] {
        self.file.repositories.as_deref().unwrap_or(&[])
    }

    /// Effective configuration, defaults filled in, as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let effective = FileConfig {
            repositories: Some(self.repositories().to_vec()),
            shell: Some(ShellConfig {
                prompt: Some(self.prompt().to_string()),
                echo: Some(self.echo()),
            }),
            history: Some(HistoryConfig {
                default_count: Some(self.history_count()),
            }),
        };
        toml::to_string_pretty(&effective)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}
