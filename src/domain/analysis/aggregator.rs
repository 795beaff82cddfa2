//! Aggregator - Collapses individual rows into per-(segment, treatment) counts.

use std::collections::BTreeMap;

use super::GroupedCounts;
use crate::domain::dataset::{Dataset, Observation, ObservationColumns};
use crate::domain::foundation::{Label, ValidationError};

/// Grouping of individual-level observations.
pub struct Aggregator;

impl Aggregator {
    /// Aggregates a row-level dataset into grouped counts.
    ///
    /// # Algorithm
    /// For each (segment, treatment) key:
    /// successes = Σ outcome, total = number of rows
    ///
    /// # Errors
    /// - `MissingColumn` if a designated column is absent
    /// - `InvalidOutcome` if an outcome is not 0, 1 or boolean
    /// - `MissingValue` / `InvalidLabel` for unusable treatment or segment cells
    pub fn aggregate(
        dataset: &Dataset,
        columns: &ObservationColumns,
    ) -> Result<GroupedCounts, ValidationError> {
        let observations = dataset.observations(columns)?;
        Ok(Self::aggregate_observations(&observations))
    }

    /// Aggregates observations that are already typed.
    ///
    /// # Edge Cases
    /// - No observations: Returns empty counts
    /// - All-failure / all-success groups: Kept with 0 or `total` successes
    /// - Row order: Does not affect the result
    pub fn aggregate_observations<'a>(
        observations: impl IntoIterator<Item = &'a Observation>,
    ) -> GroupedCounts {
        let mut groups: BTreeMap<(Label, Label), (u64, u64)> = BTreeMap::new();

        for observation in observations {
            let (successes, total) = groups
                .entry((observation.segment.clone(), observation.treatment.clone()))
                .or_insert((0, 0));
            *successes += u64::from(observation.outcome);
            *total += 1;
        }

        GroupedCounts::from_keyed(groups)
    }
}
