//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised when input data violates a structural contract.
///
/// These are fatal: the caller gets them back immediately instead of a verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required column '{column}' is missing")]
    MissingColumn { column: String },

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Outcome in row {row} must be 0, 1 or boolean, got {value}")]
    InvalidOutcome { row: usize, value: String },

    #[error("Column '{column}' has no value in row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Column '{column}' has an unusable label in row {row}: {reason}")]
    InvalidLabel {
        column: String,
        row: usize,
        reason: String,
    },

    #[error("Column '{column}' must hold non-negative integer counts, got {value} in row {row}")]
    InvalidCount {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Group ({segment}, {treatment}) has {successes} successes out of {total}")]
    SuccessesExceedTotal {
        segment: String,
        treatment: String,
        successes: u64,
        total: u64,
    },

    #[error("Group ({segment}, {treatment}) appears more than once")]
    DuplicateGroup { segment: String, treatment: String },

    #[error("Trial counts overflow at group ({segment}, {treatment})")]
    CountOverflow { segment: String, treatment: String },
}

impl ValidationError {
    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        ValidationError::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates a missing value error.
    pub fn missing_value(column: impl Into<String>, row: usize) -> Self {
        ValidationError::MissingValue {
            column: column.into(),
            row,
        }
    }

    /// Creates an invalid count error.
    pub fn invalid_count(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        ValidationError::InvalidCount {
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    /// Returns the error code this validation failure maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::MissingColumn { .. } => ErrorCode::MissingColumn,
            ValidationError::RaggedColumns { .. } => ErrorCode::MalformedDataset,
            ValidationError::InvalidOutcome { .. } => ErrorCode::InvalidOutcome,
            ValidationError::MissingValue { .. } | ValidationError::InvalidLabel { .. } => {
                ErrorCode::InvalidLabel
            }
            ValidationError::InvalidCount { .. }
            | ValidationError::SuccessesExceedTotal { .. }
            | ValidationError::DuplicateGroup { .. }
            | ValidationError::CountOverflow { .. } => ErrorCode::InvalidCounts,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    MissingColumn,
    MalformedDataset,
    InvalidOutcome,
    InvalidLabel,
    InvalidCounts,

    // Input errors
    DatasetUnreadable,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingColumn => "MISSING_COLUMN",
            ErrorCode::MalformedDataset => "MALFORMED_DATASET",
            ErrorCode::InvalidOutcome => "INVALID_OUTCOME",
            ErrorCode::InvalidLabel => "INVALID_LABEL",
            ErrorCode::InvalidCounts => "INVALID_COUNTS",
            ErrorCode::DatasetUnreadable => "DATASET_UNREADABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let domain_error = DomainError::new(err.code(), err.to_string());
        match &err {
            ValidationError::MissingColumn { column }
            | ValidationError::RaggedColumns { column, .. }
            | ValidationError::MissingValue { column, .. }
            | ValidationError::InvalidLabel { column, .. }
            | ValidationError::InvalidCount { column, .. } => {
                domain_error.with_detail("column", column.clone())
            }
            ValidationError::InvalidOutcome { row, .. } => {
                domain_error.with_detail("row", row.to_string())
            }
            ValidationError::SuccessesExceedTotal {
                segment, treatment, ..
            }
            | ValidationError::DuplicateGroup { segment, treatment }
            | ValidationError::CountOverflow { segment, treatment } => domain_error
                .with_detail("segment", segment.clone())
                .with_detail("treatment", treatment.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_displays_correctly() {
        let err = ValidationError::missing_column("recovery");
        assert_eq!(format!("{}", err), "Required column 'recovery' is missing");
    }

    #[test]
    fn invalid_outcome_displays_row_and_value() {
        let err = ValidationError::InvalidOutcome {
            row: 4,
            value: "2".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Outcome in row 4 must be 0, 1 or boolean, got 2"
        );
    }

    #[test]
    fn successes_exceed_total_displays_group() {
        let err = ValidationError::SuccessesExceedTotal {
            segment: "small".to_string(),
            treatment: "A".to_string(),
            successes: 9,
            total: 8,
        };
        assert_eq!(
            format!("{}", err),
            "Group (small, A) has 9 successes out of 8"
        );
    }

    #[test]
    fn validation_errors_map_to_codes() {
        assert_eq!(
            ValidationError::missing_column("x").code(),
            ErrorCode::MissingColumn
        );
        assert_eq!(
            ValidationError::invalid_count("total", 0, "-1").code(),
            ErrorCode::InvalidCounts
        );
        assert_eq!(
            ValidationError::missing_value("segment", 3).code(),
            ErrorCode::InvalidLabel
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::DatasetUnreadable, "File not found");
        assert_eq!(format!("{}", err), "[DATASET_UNREADABLE] File not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_column_detail() {
        let err: DomainError = ValidationError::missing_column("treatment").into();
        assert_eq!(err.code, ErrorCode::MissingColumn);
        assert_eq!(err.details.get("column"), Some(&"treatment".to_string()));
    }

    #[test]
    fn domain_error_from_duplicate_group_keeps_labels() {
        let err: DomainError = ValidationError::DuplicateGroup {
            segment: "large".to_string(),
            treatment: "B".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidCounts);
        assert_eq!(err.details.get("segment"), Some(&"large".to_string()));
        assert_eq!(err.details.get("treatment"), Some(&"B".to_string()));
    }

    #[test]
    fn domain_error_from_count_overflow_keeps_labels() {
        let err: DomainError = ValidationError::CountOverflow {
            segment: "s3".to_string(),
            treatment: "A".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidCounts);
        assert_eq!(err.details.get("segment"), Some(&"s3".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidOutcome), "INVALID_OUTCOME");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
