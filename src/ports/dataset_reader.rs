//! Dataset Reader Port - Interface for obtaining the tabular input.
//!
//! The analysis core never performs I/O; callers obtain a `Dataset` through
//! this port and hand it to the application handlers.

use std::path::PathBuf;

use crate::domain::dataset::Dataset;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors that can occur while reading a dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetReadError {
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to deserialize dataset: {0}")]
    DeserializationFailed(String),

    #[error("Dataset is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<DatasetReadError> for DomainError {
    fn from(err: DatasetReadError) -> Self {
        match err {
            DatasetReadError::Invalid(validation) => validation.into(),
            other => DomainError::new(ErrorCode::DatasetUnreadable, other.to_string()),
        }
    }
}

/// Port for loading a dataset from some source
pub trait DatasetReader: Send + Sync {
    /// Read the dataset
    ///
    /// # Errors
    /// Returns `DatasetReadError` if the source is missing, unreadable,
    /// or does not describe a well-formed column table
    fn read(&self) -> Result<Dataset, DatasetReadError>;
}
