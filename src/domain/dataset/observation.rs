//! Observation - One individual-level row.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Label;

/// A single observed trial: which treatment was chosen, in which segment,
/// and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub outcome: bool,
    pub treatment: Label,
    pub segment: Label,
}

impl Observation {
    /// Creates a new observation.
    pub fn new(outcome: bool, treatment: impl Into<Label>, segment: impl Into<Label>) -> Self {
        Self {
            outcome,
            treatment: treatment.into(),
            segment: segment.into(),
        }
    }

    /// Creates `count` identical observations.
    pub fn repeated(
        count: usize,
        outcome: bool,
        treatment: impl Into<Label>,
        segment: impl Into<Label>,
    ) -> Vec<Self> {
        vec![Self::new(outcome, treatment, segment); count]
    }
}
