//! Caller-designated column names.

use serde::{Deserialize, Serialize};

/// Columns of an individual-level dataset: one row per observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationColumns {
    pub outcome: String,
    pub treatment: String,
    pub segment: String,
}

impl ObservationColumns {
    /// Creates a new set of observation columns.
    pub fn new(
        outcome: impl Into<String>,
        treatment: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self {
            outcome: outcome.into(),
            treatment: treatment.into(),
            segment: segment.into(),
        }
    }

    /// Extends these columns with a total column, giving the pre-aggregated shape.
    pub fn with_total(&self, total: impl Into<String>) -> CountColumns {
        CountColumns {
            outcome: self.outcome.clone(),
            total: total.into(),
            treatment: self.treatment.clone(),
            segment: self.segment.clone(),
        }
    }
}

/// Columns of a pre-aggregated dataset: one row per (segment, treatment).
///
/// `outcome` holds the success count and `total` the trial count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountColumns {
    pub outcome: String,
    pub total: String,
    pub treatment: String,
    pub segment: String,
}

impl CountColumns {
    /// Creates a new set of count columns.
    pub fn new(
        outcome: impl Into<String>,
        total: impl Into<String>,
        treatment: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self {
            outcome: outcome.into(),
            total: total.into(),
            treatment: treatment.into(),
            segment: segment.into(),
        }
    }

    /// Drops the total column, giving the individual-level shape.
    pub fn observation_columns(&self) -> ObservationColumns {
        ObservationColumns::new(&self.outcome, &self.treatment, &self.segment)
    }
}
