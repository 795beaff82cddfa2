//! Grouped Counts - Success/total counts keyed by (segment, treatment).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::dataset::{labels_in, CountColumns, Dataset, Value};
use crate::domain::foundation::{Label, Rate, ValidationError};

/// Counts for one (segment, treatment) group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupedCount {
    pub segment: Label,
    pub treatment: Label,
    /// Number of trials in the group that succeeded.
    pub successes: u64,
    /// Number of trials in the group.
    pub total: u64,
}

impl GroupedCount {
    /// Creates a group record, enforcing `successes <= total`.
    pub fn try_new(
        segment: impl Into<Label>,
        treatment: impl Into<Label>,
        successes: u64,
        total: u64,
    ) -> Result<Self, ValidationError> {
        let segment = segment.into();
        let treatment = treatment.into();
        if successes > total {
            return Err(ValidationError::SuccessesExceedTotal {
                segment: segment.to_string(),
                treatment: treatment.to_string(),
                successes,
                total,
            });
        }
        Ok(Self {
            segment,
            treatment,
            successes,
            total,
        })
    }

    /// Returns the success rate, or `None` when the group has no trials.
    pub fn rate(&self) -> Option<Rate> {
        Rate::new(self.successes, self.total)
    }

    /// Returns the number of failed trials.
    pub fn failures(&self) -> u64 {
        self.total - self.successes
    }
}

/// The full set of grouped counts for one analysis run.
///
/// Holds exactly one record per (segment, treatment) pair, ordered by
/// segment label then treatment label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GroupedCount>", into = "Vec<GroupedCount>")]
pub struct GroupedCounts {
    records: Vec<GroupedCount>,
}

impl GroupedCounts {
    /// Creates an empty set of counts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates counts from records, rejecting duplicate groups.
    ///
    /// The sum of all totals must fit in a `u64`, so every pooled sum taken
    /// later (per treatment, per segment, overall) is exact.
    pub fn try_from_records(
        records: impl IntoIterator<Item = GroupedCount>,
    ) -> Result<Self, ValidationError> {
        let mut by_key: BTreeMap<(Label, Label), GroupedCount> = BTreeMap::new();
        let mut grand_total: u64 = 0;
        for record in records {
            let key = (record.segment.clone(), record.treatment.clone());
            if by_key.contains_key(&key) {
                return Err(ValidationError::DuplicateGroup {
                    segment: record.segment.to_string(),
                    treatment: record.treatment.to_string(),
                });
            }
            grand_total = grand_total.checked_add(record.total).ok_or_else(|| {
                ValidationError::CountOverflow {
                    segment: record.segment.to_string(),
                    treatment: record.treatment.to_string(),
                }
            })?;
            by_key.insert(key, record);
        }
        Ok(Self {
            records: by_key.into_values().collect(),
        })
    }

    /// Creates counts from an already-keyed map; keys are unique by construction.
    pub(crate) fn from_keyed(groups: BTreeMap<(Label, Label), (u64, u64)>) -> Self {
        let records = groups
            .into_iter()
            .map(|((segment, treatment), (successes, total))| GroupedCount {
                segment,
                treatment,
                successes,
                total,
            })
            .collect();
        Self { records }
    }

    /// Reads pre-aggregated counts from a dataset with one row per group.
    ///
    /// # Errors
    /// - `MissingColumn` if any of the four columns is absent
    /// - `InvalidCount` for negative, fractional or non-numeric counts
    /// - `SuccessesExceedTotal` if a row has more successes than trials
    /// - `DuplicateGroup` if a (segment, treatment) pair appears twice
    /// - `InvalidLabel` if a label column mixes text, numbers and booleans
    /// - `CountOverflow` if the totals add up past `u64::MAX`
    pub fn from_dataset(dataset: &Dataset, columns: &CountColumns) -> Result<Self, ValidationError> {
        let successes = dataset.column(&columns.outcome)?;
        let totals = dataset.column(&columns.total)?;
        let treatments = labels_in(&columns.treatment, dataset.column(&columns.treatment)?)?;
        let segments = labels_in(&columns.segment, dataset.column(&columns.segment)?)?;

        let mut records = Vec::with_capacity(dataset.row_count());
        for (row, (segment, treatment)) in segments.into_iter().zip(treatments).enumerate() {
            records.push(GroupedCount::try_new(
                segment,
                treatment,
                count_at(&columns.outcome, row, &successes[row])?,
                count_at(&columns.total, row, &totals[row])?,
            )?);
        }

        Self::try_from_records(records)
    }

    /// Renders the counts as a four-column dataset, one row per group.
    pub fn to_dataset(&self, columns: &CountColumns) -> Result<Dataset, ValidationError> {
        Dataset::builder()
            .column(
                &columns.segment,
                self.records.iter().map(|r| Value::from(&r.segment)),
            )
            .column(
                &columns.treatment,
                self.records.iter().map(|r| Value::from(&r.treatment)),
            )
            .column(
                &columns.outcome,
                self.records.iter().map(|r| Value::from(r.successes)),
            )
            .column(
                &columns.total,
                self.records.iter().map(|r| Value::from(r.total)),
            )
            .build()
    }

    /// Looks up the record for a (segment, treatment) pair.
    pub fn get(&self, segment: &str, treatment: &str) -> Option<&GroupedCount> {
        self.records
            .iter()
            .find(|r| r.segment.as_str() == segment && r.treatment.as_str() == treatment)
    }

    /// Iterates records in (segment, treatment) order.
    pub fn iter(&self) -> std::slice::Iter<'_, GroupedCount> {
        self.records.iter()
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the distinct segments that have at least one group.
    pub fn segments(&self) -> BTreeSet<&Label> {
        self.records.iter().map(|r| &r.segment).collect()
    }

    /// Returns the distinct treatments that have at least one group.
    pub fn treatments(&self) -> BTreeSet<&Label> {
        self.records.iter().map(|r| &r.treatment).collect()
    }

    /// Sum of trials across all groups.
    pub fn total_observations(&self) -> u64 {
        self.records.iter().map(|r| r.total).sum()
    }

    /// Sum of successes across all groups.
    pub fn total_successes(&self) -> u64 {
        self.records.iter().map(|r| r.successes).sum()
    }
}

fn count_at(column: &str, row: usize, value: &Value) -> Result<u64, ValidationError> {
    value
        .as_count()
        .ok_or_else(|| ValidationError::invalid_count(column, row, value.to_string()))
}

impl TryFrom<Vec<GroupedCount>> for GroupedCounts {
    type Error = ValidationError;

    fn try_from(records: Vec<GroupedCount>) -> Result<Self, Self::Error> {
        Self::try_from_records(records)
    }
}

impl From<GroupedCounts> for Vec<GroupedCount> {
    fn from(counts: GroupedCounts) -> Self {
        counts.records
    }
}

impl<'a> IntoIterator for &'a GroupedCounts {
    type Item = &'a GroupedCount;
    type IntoIter = std::slice::Iter<'a, GroupedCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
