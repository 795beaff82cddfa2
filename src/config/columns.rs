//! Column name configuration

use serde::Deserialize;
use std::collections::HashSet;

use super::error::ValidationError;
use crate::domain::dataset::{CountColumns, ObservationColumns};

/// Names of the dataset columns the analysis reads
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    /// Binary outcome per row, or success count per group
    #[serde(default = "default_outcome")]
    pub outcome: String,

    /// Trial count per group (pre-aggregated input only)
    #[serde(default = "default_total")]
    pub total: String,

    /// Treatment / choice column
    #[serde(default = "default_treatment")]
    pub treatment: String,

    /// Segment / confounder column
    #[serde(default = "default_segment")]
    pub segment: String,
}

impl ColumnsConfig {
    /// Columns for individual-level rows
    pub fn observation_columns(&self) -> ObservationColumns {
        ObservationColumns::new(&self.outcome, &self.treatment, &self.segment)
    }

    /// Columns for pre-aggregated rows
    pub fn count_columns(&self) -> CountColumns {
        CountColumns::new(&self.outcome, &self.total, &self.treatment, &self.segment)
    }

    /// Validate column configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let named = [
            ("outcome", &self.outcome),
            ("total", &self.total),
            ("treatment", &self.treatment),
            ("segment", &self.segment),
        ];

        let mut seen = HashSet::new();
        for (role, name) in named {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyColumnName(role));
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::DuplicateColumnName(name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            outcome: default_outcome(),
            total: default_total(),
            treatment: default_treatment(),
            segment: default_segment(),
        }
    }
}

fn default_outcome() -> String {
    "recovery".to_string()
}

fn default_total() -> String {
    "total".to_string()
}

fn default_treatment() -> String {
    "treatment".to_string()
}

fn default_segment() -> String {
    "kidney_stone_size".to_string()
}
