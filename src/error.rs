//! This module defines all error types used throughout the application.

use std::io;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No state machine factory is registered under the requested type name
    #[error("No state machine registered for type '{0}'")]
    UnregisteredType(String),

    /// Invalid command-line usage
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// Graph serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Check if error should be reported with the usage synopsis
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON error: {}", err))
    }
}
