//! Dataset - Column-oriented table supplied by the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Observation, ObservationColumns, Value};
use crate::domain::foundation::{Label, ValidationError};

/// A table stored as column name -> column values, rows aligned by position.
///
/// All columns hold the same number of rows; this is checked on construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<Value>>", into = "BTreeMap<String, Vec<Value>>")]
pub struct Dataset {
    columns: BTreeMap<String, Vec<Value>>,
    row_count: usize,
}

impl Dataset {
    /// Creates an empty dataset with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a dataset column by column.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    /// Creates a dataset from named columns, checking that row counts agree.
    pub fn from_columns(columns: BTreeMap<String, Vec<Value>>) -> Result<Self, ValidationError> {
        let mut row_count = None;
        for (name, values) in &columns {
            match row_count {
                None => row_count = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(ValidationError::RaggedColumns {
                        column: name.clone(),
                        expected,
                        actual: values.len(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            columns,
            row_count: row_count.unwrap_or(0),
        })
    }

    /// Builds an individual-level dataset from observations.
    ///
    /// Outcomes are written as `1`/`0` integers.
    pub fn from_observations(
        observations: &[Observation],
        columns: &ObservationColumns,
    ) -> Result<Self, ValidationError> {
        Self::builder()
            .column(
                &columns.outcome,
                observations.iter().map(|o| Value::Int(i64::from(o.outcome))),
            )
            .column(
                &columns.treatment,
                observations.iter().map(|o| Value::from(&o.treatment)),
            )
            .column(
                &columns.segment,
                observations.iter().map(|o| Value::from(&o.segment)),
            )
            .build()
    }

    /// Returns the values of a column, or `MissingColumn` if absent.
    pub fn column(&self, name: &str) -> Result<&[Value], ValidationError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ValidationError::missing_column(name))
    }

    /// Returns true if the dataset has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Returns the column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Reads the observations held in the given columns.
    ///
    /// # Errors
    /// - `MissingColumn` if any of the three columns is absent
    /// - `InvalidOutcome` if an outcome is not 0, 1 or boolean
    /// - `MissingValue` / `InvalidLabel` if a treatment or segment cannot be a label
    pub fn observations(
        &self,
        columns: &ObservationColumns,
    ) -> Result<Vec<Observation>, ValidationError> {
        let outcomes = self.column(&columns.outcome)?;
        let treatments = self.column(&columns.treatment)?;
        let segments = self.column(&columns.segment)?;

        let outcomes = outcomes
            .iter()
            .enumerate()
            .map(|(row, outcome)| {
                outcome
                    .as_outcome()
                    .ok_or_else(|| ValidationError::InvalidOutcome {
                        row,
                        value: outcome.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let treatments = labels_in(&columns.treatment, treatments)?;
        let segments = labels_in(&columns.segment, segments)?;

        Ok(outcomes
            .into_iter()
            .zip(treatments)
            .zip(segments)
            .map(|((outcome, treatment), segment)| Observation {
                outcome,
                treatment,
                segment,
            })
            .collect())
    }
}

/// Reads a whole column as category labels.
///
/// Every cell must be usable as a label, and all cells must share one kind
/// (text, number or boolean): `"1"` and `1` are different categories, so a
/// column mixing them is rejected instead of merging them.
pub(crate) fn labels_in(column: &str, values: &[Value]) -> Result<Vec<Label>, ValidationError> {
    let mut column_kind: Option<&'static str> = None;
    values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            let label = label_at(column, row, value)?;
            let kind = value.kind();
            match column_kind {
                None => column_kind = Some(kind),
                Some(expected) if expected != kind => {
                    return Err(ValidationError::InvalidLabel {
                        column: column.to_string(),
                        row,
                        reason: format!("{} label in a column of {} labels", kind, expected),
                    });
                }
                Some(_) => {}
            }
            Ok(label)
        })
        .collect()
}

/// Reads a category label from a cell, attributing failures to the cell.
fn label_at(column: &str, row: usize, value: &Value) -> Result<Label, ValidationError> {
    if value.is_null() {
        return Err(ValidationError::missing_value(column, row));
    }
    value
        .as_label()
        .map_err(|reason| ValidationError::InvalidLabel {
            column: column.to_string(),
            row,
            reason: reason.to_string(),
        })
}

impl TryFrom<BTreeMap<String, Vec<Value>>> for Dataset {
    type Error = ValidationError;

    fn try_from(columns: BTreeMap<String, Vec<Value>>) -> Result<Self, Self::Error> {
        Self::from_columns(columns)
    }
}

impl From<Dataset> for BTreeMap<String, Vec<Value>> {
    fn from(dataset: Dataset) -> Self {
        dataset.columns
    }
}

/// Builder for constructing Dataset instances.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: BTreeMap<String, Vec<Value>>,
}

impl DatasetBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a column.
    pub fn column<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.columns
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the dataset, checking that all columns have the same length.
    pub fn build(self) -> Result<Dataset, ValidationError> {
        Dataset::from_columns(self.columns)
    }
}
