//! Verdict - Result of a paradox check, with the rate breakdown behind it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{GlobalRates, RateTable};
use crate::domain::foundation::Label;

/// Why the detector reached its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictReason {
    /// Every segment agrees on one treatment and the pooled data picks another.
    ParadoxDetected,
    /// Every segment agrees with the pooled optimum.
    ConsistentTrend,
    /// Segments disagree with each other, so there is no single local trend.
    InconsistentSegments,
    /// Fewer than two treatments have a defined pooled rate.
    InsufficientTreatments,
    /// Fewer than two segments have a local optimum.
    InsufficientSegments,
    /// An unresolved tie left the pooled or local optimum undetermined.
    Inconclusive,
}

impl VerdictReason {
    /// Returns true when the verdict came from degenerate input rather than
    /// from comparing trends.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            VerdictReason::InsufficientTreatments
                | VerdictReason::InsufficientSegments
                | VerdictReason::Inconclusive
        )
    }

    /// Returns a one-line human description.
    pub fn describe(&self) -> &'static str {
        match self {
            VerdictReason::ParadoxDetected => "Simpson's paradox detected",
            VerdictReason::ConsistentTrend => {
                "Simpson's paradox not detected: segments agree with the pooled optimum"
            }
            VerdictReason::InconsistentSegments => {
                "Simpson's paradox not detected: segmented rates do not have a consistent optimal choice"
            }
            VerdictReason::InsufficientTreatments => {
                "Simpson's paradox not applicable: fewer than two treatments"
            }
            VerdictReason::InsufficientSegments => {
                "Simpson's paradox not applicable: fewer than two segments"
            }
            VerdictReason::Inconclusive => {
                "Simpson's paradox undetermined: tied rates left no optimal choice"
            }
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A note about degenerate or ambiguous data encountered during detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A group has zero trials, so its rate is undefined and was skipped.
    UndefinedRate { segment: Label, treatment: Label },
    /// A segment has no defined rate and took no part in the consistency check.
    SegmentExcluded { segment: Label },
    /// A treatment has zero trials overall and took no part in the pooled argmax.
    TreatmentExcluded { treatment: Label },
    /// Only one treatment was observed in a segment; it is optimal by default.
    SingleTreatmentSegment { segment: Label, treatment: Label },
    /// Several treatments share the highest pooled rate.
    GlobalTie {
        treatments: Vec<Label>,
        resolved_to: Option<Label>,
    },
    /// Several treatments share the highest rate within a segment.
    SegmentTie {
        segment: Label,
        treatments: Vec<Label>,
        resolved_to: Option<Label>,
    },
    /// Fewer than two treatments have a defined pooled rate.
    TooFewTreatments { count: usize },
    /// Fewer than two segments have a local optimum.
    TooFewSegments { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UndefinedRate { segment, treatment } => {
                write!(f, "rate undefined for ({}, {}): no trials", segment, treatment)
            }
            Diagnostic::SegmentExcluded { segment } => {
                write!(f, "segment {} excluded: no defined rate", segment)
            }
            Diagnostic::TreatmentExcluded { treatment } => {
                write!(f, "treatment {} excluded: no trials in any segment", treatment)
            }
            Diagnostic::SingleTreatmentSegment { segment, treatment } => {
                write!(f, "segment {} only observed treatment {}", segment, treatment)
            }
            Diagnostic::GlobalTie {
                treatments,
                resolved_to,
            } => {
                write!(f, "pooled rates tied between {}", join(treatments))?;
                write_resolution(f, resolved_to.as_ref())
            }
            Diagnostic::SegmentTie {
                segment,
                treatments,
                resolved_to,
            } => {
                write!(f, "segment {} rates tied between {}", segment, join(treatments))?;
                write_resolution(f, resolved_to.as_ref())
            }
            Diagnostic::TooFewTreatments { count } => {
                write!(f, "only {} treatment(s) with a defined rate", count)
            }
            Diagnostic::TooFewSegments { count } => {
                write!(f, "only {} segment(s) with a local optimum", count)
            }
        }
    }
}

fn join(labels: &[Label]) -> String {
    labels
        .iter()
        .map(Label::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_resolution(f: &mut fmt::Formatter<'_>, resolved_to: Option<&Label>) -> fmt::Result {
    match resolved_to {
        Some(label) => write!(f, "; picked {}", label),
        None => write!(f, "; no winner picked"),
    }
}

/// The rate tables a verdict was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreakdown {
    /// Treatment -> rate pooled over every segment.
    pub global: GlobalRates,
    /// Segment -> treatment -> rate.
    pub local: RateTable,
}

/// The outcome of a paradox check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub paradox_detected: bool,
    pub reason: VerdictReason,
    /// Treatment with the highest pooled rate (None if undetermined).
    pub global_optimal: Option<Label>,
    /// Segment -> treatment with the highest rate in that segment.
    pub local_optimals: BTreeMap<Label, Label>,
    /// Distinct values of `local_optimals`.
    pub distinct_local_optimals: BTreeSet<Label>,
    pub rates: RateBreakdown,
    pub diagnostics: Vec<Diagnostic>,
}

impl Verdict {
    /// Returns the shared local optimum when every participating segment agrees.
    pub fn local_optimal(&self) -> Option<&Label> {
        if self.distinct_local_optimals.len() == 1 {
            self.distinct_local_optimals.iter().next()
        } else {
            None
        }
    }

    /// Returns the local optimum of one segment.
    pub fn local_optimal_for(&self, segment: &str) -> Option<&Label> {
        self.local_optimals.get(segment)
    }

    /// Returns true if any diagnostic was recorded.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
