//! Error types for reqpacer-core

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (fatal at startup)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller contract violation, raised before any scheduling begins
    #[error("invalid run context: {0}")]
    InvalidContext(String),

    /// Internal scheduler fault
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

impl Error {
    /// Shorthand for a missing required field on a builder
    pub fn missing(field: &str) -> Self {
        Error::InvalidContext(format!("{field} is required"))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
