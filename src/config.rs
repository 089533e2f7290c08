//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - An explicit `-config` path
//! - Configuration files (TOML) in well-known locations
//! - Defaults

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::visualize::DEFAULT_IMPL_SUFFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Project-local configuration file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "state-machine-viz.toml";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub visualize: VisualizeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Short names mapped to registered type names
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Graph generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizeConfig {
    /// Suffix stripped from type names when naming subgraphs. Empty disables stripping.
    #[serde(default = "default_impl_suffix")]
    pub impl_suffix: String,

    /// Output format used when `-format` is not given
    #[serde(default)]
    pub format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error) or any EnvFilter directive
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_impl_suffix() -> String {
    DEFAULT_IMPL_SUFFIX.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for VisualizeConfig {
    fn default() -> Self {
        Self {
            impl_suffix: default_impl_suffix(),
            format: OutputFormat::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Find the first existing configuration file
    ///
    /// Searches in order:
    /// 1. ./state-machine-viz.toml
    /// 2. ~/.state-machine-viz/config.toml
    /// 3. /etc/state-machine-viz/config.toml
    pub fn locate() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".state-machine-viz").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/state-machine-viz/config.toml"));

        paths.into_iter().find(|path| path.exists())
    }

    /// Load configuration from an explicit path, or from default locations
    pub fn load(explicit: Option<&PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let path = explicit.cloned().or_else(Self::locate);
        match path {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => Ok((Config::default(), None)),
        }
    }
}
