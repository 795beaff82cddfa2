//! Rate Tables - Pooled and per-segment success rates derived from counts.
//!
//! Both tables only hold defined rates: a group with zero trials has no
//! entry, so it can never win or lose an argmax.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::GroupedCounts;
use crate::domain::foundation::{Label, Rate};

/// Rates per treatment pooled over every segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalRates(BTreeMap<Label, Rate>);

impl GlobalRates {
    /// Sums successes and totals per treatment, ignoring segments.
    ///
    /// Treatments whose pooled total is zero are left out.
    pub fn from_counts(counts: &GroupedCounts) -> Self {
        let mut pooled: BTreeMap<&Label, (u64, u64)> = BTreeMap::new();
        for group in counts {
            let (successes, total) = pooled.entry(&group.treatment).or_insert((0, 0));
            *successes += group.successes;
            *total += group.total;
        }

        let rates = pooled
            .into_iter()
            .filter_map(|(treatment, (successes, total))| {
                Rate::new(successes, total).map(|rate| (treatment.clone(), rate))
            })
            .collect();
        Self(rates)
    }

    /// Returns the pooled rate for a treatment.
    pub fn get(&self, treatment: &str) -> Option<Rate> {
        self.0.get(treatment).copied()
    }

    /// Returns the underlying treatment -> rate map.
    pub fn as_map(&self) -> &BTreeMap<Label, Rate> {
        &self.0
    }

    /// Iterates treatments in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Rate)> {
        self.0.iter()
    }

    /// Returns true if the treatment has a defined pooled rate.
    pub fn contains(&self, treatment: &str) -> bool {
        self.0.contains_key(treatment)
    }

    /// Returns the number of treatments with a defined rate.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no treatment has a defined rate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rates per segment, then per treatment within the segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<Label, BTreeMap<Label, Rate>>);

impl RateTable {
    /// Builds the segment -> treatment -> rate lookup.
    ///
    /// Groups with zero trials are left out, and a segment with no defined
    /// rate at all gets no row.
    pub fn from_counts(counts: &GroupedCounts) -> Self {
        let mut table: BTreeMap<Label, BTreeMap<Label, Rate>> = BTreeMap::new();
        for group in counts {
            if let Some(rate) = group.rate() {
                table
                    .entry(group.segment.clone())
                    .or_default()
                    .insert(group.treatment.clone(), rate);
            }
        }
        Self(table)
    }

    /// Returns the rate of one cell.
    pub fn get(&self, segment: &str, treatment: &str) -> Option<Rate> {
        self.0.get(segment)?.get(treatment).copied()
    }

    /// Returns the treatment -> rate row for a segment.
    pub fn segment(&self, segment: &str) -> Option<&BTreeMap<Label, Rate>> {
        self.0.get(segment)
    }

    /// Iterates segments in label order with their rows.
    pub fn segments(&self) -> impl Iterator<Item = (&Label, &BTreeMap<Label, Rate>)> {
        self.0.iter()
    }

    /// Returns true if the segment has at least one defined rate.
    pub fn contains_segment(&self, segment: &str) -> bool {
        self.0.contains_key(segment)
    }

    /// Returns every treatment that has a defined rate in some segment.
    pub fn treatments(&self) -> BTreeSet<&Label> {
        self.0.values().flat_map(|row| row.keys()).collect()
    }

    /// Returns the number of segments with at least one defined rate.
    pub fn segment_count(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no cell has a defined rate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
