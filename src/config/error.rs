//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(&'static str),

    #[error("Column name '{0}' is assigned to more than one role")]
    DuplicateColumnName(String),

    #[error("Rate precision must be between 1 and 12")]
    InvalidPrecision,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
