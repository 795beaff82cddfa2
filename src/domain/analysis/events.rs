//! Analysis records.
//!
//! A `ParadoxAnalyzed` record is produced for every completed analysis run.
//! It carries the derived counts and the verdict so a presentation layer or
//! audit trail can use them without recomputation.

use serde::{Deserialize, Serialize};

use super::{GroupedCounts, Verdict};
use crate::domain::foundation::{AnalysisId, Timestamp};

/// Published when a paradox check completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParadoxAnalyzed {
    /// Unique identifier of this run.
    pub analysis_id: AnalysisId,
    /// Number of individual observations behind the counts.
    pub observation_count: u64,
    /// Number of (segment, treatment) groups.
    pub group_count: usize,
    /// The counts the verdict was computed from.
    pub grouped_counts: GroupedCounts,
    /// The verdict with its rate breakdown and diagnostics.
    pub verdict: Verdict,
    /// When the analysis was computed.
    pub computed_at: Timestamp,
}

impl ParadoxAnalyzed {
    /// Creates a record for a freshly computed verdict.
    pub fn new(grouped_counts: GroupedCounts, verdict: Verdict) -> Self {
        Self {
            analysis_id: AnalysisId::new(),
            observation_count: grouped_counts.total_observations(),
            group_count: grouped_counts.len(),
            grouped_counts,
            verdict,
            computed_at: Timestamp::now(),
        }
    }

    /// Returns true if the run found a paradox.
    pub fn paradox_detected(&self) -> bool {
        self.verdict.paradox_detected
    }
}
