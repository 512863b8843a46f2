//! Configuration schema (ctxgen.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::dialect::Dialect;

/// Database engine settings used when resolving value search templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueSearchConfig {
    /// Database engine (e.g. "postgresql")
    pub engine: String,

    /// Engine version (e.g. "16"); unset means engine defaults
    #[serde(default)]
    pub version: Option<String>,
}

impl Default for ValueSearchConfig {
    fn default() -> Self {
        Self {
            engine: "postgresql".to_string(),
            version: None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dialect used for placeholder syntax
    #[serde(default)]
    pub dialect: Dialect,

    /// Default context set file for --attach
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Value search engine settings
    #[serde(default)]
    pub value_search: ValueSearchConfig,

    /// Project root path (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            output: None,
            value_search: ValueSearchConfig::default(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Default config file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "ctxgen.toml";

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Resolve a path from the config against the project root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.project_root.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
