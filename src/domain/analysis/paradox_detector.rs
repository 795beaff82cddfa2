//! Paradox Detector - Compares the pooled optimum with per-segment optima.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    Diagnostic, GlobalRates, GroupedCounts, RateBreakdown, RateTable, Selection, TieBreak,
    Verdict, VerdictReason,
};
use crate::domain::dataset::{CountColumns, Dataset};
use crate::domain::foundation::{Label, ValidationError};

/// Non-Bayesian Simpson's paradox check over grouped counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParadoxDetector {
    tie_break: TieBreak,
}

impl ParadoxDetector {
    /// Creates a detector with the given tie-break policy.
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Returns the tie-break policy in use.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Reads pre-aggregated counts from a dataset and runs the check.
    ///
    /// # Errors
    /// Returns `ValidationError` for missing columns or malformed counts.
    /// Degenerate but well-formed data never errors; it yields a verdict
    /// with diagnostics.
    pub fn detect_dataset(
        &self,
        dataset: &Dataset,
        columns: &CountColumns,
    ) -> Result<Verdict, ValidationError> {
        let counts = GroupedCounts::from_dataset(dataset, columns)?;
        Ok(self.detect(&counts))
    }

    /// Runs the check on grouped counts.
    ///
    /// # Algorithm
    /// 1. global_optimal = argmax over treatments of Σsuccesses / Σtotal
    /// 2. local_optimal(segment) = argmax over treatments observed in the segment
    /// 3. More than one distinct local optimum -> no paradox (segments disagree).
    ///    Exactly one, differing from the global optimum -> paradox.
    ///
    /// # Edge Cases
    /// - Zero-total groups: Excluded from every argmax, noted as `UndefinedRate`
    /// - Segment with no defined rate: Excluded from the consistency check
    /// - Segment with one treatment: That treatment is its local optimum
    /// - Fewer than two treatments or segments: No paradox, degenerate reason
    /// - Segment whose tie is left unresolved: Does not count as a segment
    /// - Ties: Resolved by the configured `TieBreak`, always noted
    pub fn detect(&self, counts: &GroupedCounts) -> Verdict {
        let mut diagnostics = Vec::new();

        for group in counts.iter().filter(|g| g.total == 0) {
            diagnostics.push(Diagnostic::UndefinedRate {
                segment: group.segment.clone(),
                treatment: group.treatment.clone(),
            });
        }

        let global = GlobalRates::from_counts(counts);
        let local = RateTable::from_counts(counts);

        for treatment in counts.treatments() {
            if !global.contains(treatment.as_str()) {
                diagnostics.push(Diagnostic::TreatmentExcluded {
                    treatment: treatment.clone(),
                });
            }
        }
        for segment in counts.segments() {
            if !local.contains_segment(segment.as_str()) {
                diagnostics.push(Diagnostic::SegmentExcluded {
                    segment: segment.clone(),
                });
            }
        }

        let global_optimal = match self.tie_break.select(global.as_map()) {
            Selection::Tied { treatments, winner } => {
                diagnostics.push(Diagnostic::GlobalTie {
                    treatments,
                    resolved_to: winner.clone(),
                });
                winner
            }
            selection => selection.winner().cloned(),
        };

        let local_optimals = self.local_optimals(&local, &mut diagnostics);
        let distinct_local_optimals: BTreeSet<Label> = local_optimals.values().cloned().collect();

        let reason = if global.len() < 2 {
            diagnostics.push(Diagnostic::TooFewTreatments { count: global.len() });
            VerdictReason::InsufficientTreatments
        } else if local_optimals.len() < 2 {
            diagnostics.push(Diagnostic::TooFewSegments {
                count: local_optimals.len(),
            });
            VerdictReason::InsufficientSegments
        } else {
            Self::compare(global_optimal.as_ref(), &distinct_local_optimals)
        };

        Verdict {
            paradox_detected: reason == VerdictReason::ParadoxDetected,
            reason,
            global_optimal,
            local_optimals,
            distinct_local_optimals,
            rates: RateBreakdown { global, local },
            diagnostics,
        }
    }

    /// Picks the best treatment of every segment that has a defined rate.
    ///
    /// Segments whose tie is left unresolved get no entry.
    fn local_optimals(
        &self,
        local: &RateTable,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> BTreeMap<Label, Label> {
        let mut optimals = BTreeMap::new();

        for (segment, rates) in local.segments() {
            let winner = match self.tie_break.select(rates) {
                Selection::Empty => None,
                Selection::Unique(treatment) => {
                    if rates.len() == 1 {
                        diagnostics.push(Diagnostic::SingleTreatmentSegment {
                            segment: segment.clone(),
                            treatment: treatment.clone(),
                        });
                    }
                    Some(treatment)
                }
                Selection::Tied { treatments, winner } => {
                    diagnostics.push(Diagnostic::SegmentTie {
                        segment: segment.clone(),
                        treatments,
                        resolved_to: winner.clone(),
                    });
                    winner
                }
            };

            if let Some(treatment) = winner {
                optimals.insert(segment.clone(), treatment);
            }
        }

        optimals
    }

    /// Compares the pooled optimum against the set of distinct local optima.
    fn compare(global_optimal: Option<&Label>, distinct_local: &BTreeSet<Label>) -> VerdictReason {
        let Some(global_optimal) = global_optimal else {
            return VerdictReason::Inconclusive;
        };

        match distinct_local.len() {
            0 => VerdictReason::Inconclusive,
            1 if distinct_local.contains(global_optimal) => VerdictReason::ConsistentTrend,
            1 => VerdictReason::ParadoxDetected,
            _ => VerdictReason::InconsistentSegments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::GroupedCount;
    use crate::domain::foundation::Rate;

    fn counts(rows: &[(&str, &str, u64, u64)]) -> GroupedCounts {
        GroupedCounts::try_from_records(rows.iter().map(|(segment, treatment, successes, total)| {
            GroupedCount::try_new(*segment, *treatment, *successes, *total).unwrap()
        }))
        .unwrap()
    }

    fn kidney_stones() -> GroupedCounts {
        counts(&[
            ("small", "A", 81, 87),
            ("small", "B", 234, 270),
            ("large", "A", 192, 263),
            ("large", "B", 55, 80),
        ])
    }

    fn label(s: &str) -> Label {
        Label::new(s)
    }

    // Core verdicts

    #[test]
    fn kidney_stones_show_paradox() {
        let verdict = ParadoxDetector::default().detect(&kidney_stones());

        assert!(verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::ParadoxDetected);
        assert_eq!(verdict.global_optimal, Some(label("B")));
        assert_eq!(verdict.local_optimal(), Some(&label("A")));
        assert_eq!(verdict.local_optimal_for("small"), Some(&label("A")));
        assert_eq!(verdict.local_optimal_for("large"), Some(&label("A")));
        assert!(verdict.diagnostics.is_empty());
    }

    #[test]
    fn kidney_stones_expose_rate_tables() {
        let verdict = ParadoxDetector::default().detect(&kidney_stones());

        assert_eq!(verdict.rates.global.get("A"), Rate::new(273, 350));
        assert_eq!(verdict.rates.global.get("B"), Rate::new(289, 350));
        assert_eq!(verdict.rates.local.get("small", "B"), Rate::new(234, 270));
        assert_eq!(verdict.rates.local.get("large", "A"), Rate::new(192, 263));
        let global_b = verdict.rates.global.get("B").unwrap().as_f64();
        assert!((global_b - 0.826).abs() < 0.001);
    }

    #[test]
    fn uniformly_better_treatment_is_no_paradox() {
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("small", "A", 90, 100),
            ("small", "B", 80, 100),
            ("large", "A", 70, 100),
            ("large", "B", 60, 100),
        ]));

        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::ConsistentTrend);
        assert_eq!(verdict.global_optimal, Some(label("A")));
        assert_eq!(verdict.local_optimal(), Some(&label("A")));
    }

    #[test]
    fn disagreeing_segments_are_no_paradox() {
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("s1", "A", 9, 10),
            ("s1", "B", 5, 10),
            ("s2", "A", 2, 10),
            ("s2", "B", 8, 10),
        ]));

        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::InconsistentSegments);
        assert_eq!(verdict.local_optimal_for("s1"), Some(&label("A")));
        assert_eq!(verdict.local_optimal_for("s2"), Some(&label("B")));
        assert_eq!(verdict.distinct_local_optimals.len(), 2);
        assert_eq!(verdict.local_optimal(), None);
        assert!(verdict.global_optimal.is_some());
    }

    #[test]
    fn three_treatments_paradox() {
        // C wins inside each segment but loses once pooled because most of
        // its trials fall in the hard segment.
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("easy", "A", 80, 100),
            ("easy", "B", 70, 100),
            ("easy", "C", 9, 10),
            ("hard", "A", 3, 10),
            ("hard", "B", 2, 10),
            ("hard", "C", 40, 100),
        ]));

        assert!(verdict.paradox_detected);
        assert_eq!(verdict.local_optimal(), Some(&label("C")));
        assert_eq!(verdict.global_optimal, Some(label("A")));
    }

    // Degenerate inputs

    #[test]
    fn empty_counts_are_insufficient() {
        let verdict = ParadoxDetector::default().detect(&GroupedCounts::empty());

        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::InsufficientTreatments);
        assert_eq!(verdict.global_optimal, None);
        assert!(verdict
            .diagnostics
            .contains(&Diagnostic::TooFewTreatments { count: 0 }));
    }

    #[test]
    fn single_treatment_is_insufficient() {
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("small", "A", 1, 2),
            ("large", "A", 2, 3),
        ]));

        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::InsufficientTreatments);
        assert_eq!(verdict.global_optimal, Some(label("A")));
    }

    #[test]
    fn single_segment_is_insufficient() {
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("only", "A", 9, 10),
            ("only", "B", 1, 10),
        ]));

        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::InsufficientSegments);
        assert!(verdict
            .diagnostics
            .contains(&Diagnostic::TooFewSegments { count: 1 }));
        // Rates are still reported for presentation.
        assert_eq!(verdict.local_optimal_for("only"), Some(&label("A")));
    }

    #[test]
    fn zero_total_cell_is_not_treated_as_zero_rate() {
        // B has no trials in "small"; were it rate 0, A would trivially win there.
        // Instead "small" only has A, which still participates.
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("small", "A", 1, 10),
            ("small", "B", 0, 0),
            ("large", "A", 90, 100),
            ("large", "B", 1, 100),
        ]));

        assert_eq!(verdict.rates.local.get("small", "B"), None);
        assert!(verdict.diagnostics.contains(&Diagnostic::UndefinedRate {
            segment: label("small"),
            treatment: label("B"),
        }));
        assert!(verdict.diagnostics.contains(&Diagnostic::SingleTreatmentSegment {
            segment: label("small"),
            treatment: label("A"),
        }));
        assert_eq!(verdict.reason, VerdictReason::ConsistentTrend);
    }

    #[test]
    fn segment_without_trials_is_excluded() {
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("small", "A", 81, 87),
            ("small", "B", 234, 270),
            ("large", "A", 192, 263),
            ("large", "B", 55, 80),
            ("empty", "A", 0, 0),
            ("empty", "B", 0, 0),
        ]));

        assert!(verdict.paradox_detected);
        assert_eq!(verdict.local_optimal_for("empty"), None);
        assert!(verdict.diagnostics.contains(&Diagnostic::SegmentExcluded {
            segment: label("empty"),
        }));
    }

    #[test]
    fn treatment_without_trials_is_excluded() {
        let verdict = ParadoxDetector::default().detect(&counts(&[
            ("small", "A", 8, 10),
            ("small", "B", 6, 10),
            ("small", "C", 0, 0),
            ("large", "A", 5, 10),
            ("large", "B", 3, 10),
        ]));

        assert!(!verdict.rates.global.contains("C"));
        assert!(verdict.diagnostics.contains(&Diagnostic::TreatmentExcluded {
            treatment: label("C"),
        }));
        assert_eq!(verdict.reason, VerdictReason::ConsistentTrend);
    }

    // Tie-break

    #[test]
    fn lowest_label_resolves_segment_tie() {
        let verdict = ParadoxDetector::new(TieBreak::LowestLabel).detect(&counts(&[
            ("s1", "A", 5, 10),
            ("s1", "B", 1, 2),
            ("s2", "A", 9, 10),
            ("s2", "B", 1, 10),
        ]));

        assert_eq!(verdict.local_optimal_for("s1"), Some(&label("A")));
        assert!(verdict.diagnostics.contains(&Diagnostic::SegmentTie {
            segment: label("s1"),
            treatments: vec![label("A"), label("B")],
            resolved_to: Some(label("A")),
        }));
        assert_eq!(verdict.reason, VerdictReason::ConsistentTrend);
    }

    #[test]
    fn abstain_drops_tied_segment_from_check() {
        let verdict = ParadoxDetector::new(TieBreak::Abstain).detect(&counts(&[
            ("s1", "A", 5, 10),
            ("s1", "B", 1, 2),
            ("s2", "A", 1, 10),
            ("s2", "B", 9, 10),
            ("s3", "A", 2, 10),
            ("s3", "B", 7, 10),
        ]));

        // Pooled: A 8/30, B 17/22 -> B. Only s2 and s3 vote, both for B.
        assert_eq!(verdict.local_optimal_for("s1"), None);
        assert_eq!(verdict.local_optimal(), Some(&label("B")));
        assert_eq!(verdict.reason, VerdictReason::ConsistentTrend);
    }

    #[test]
    fn abstained_tie_leaving_one_voting_segment_is_insufficient() {
        let verdict = ParadoxDetector::new(TieBreak::Abstain).detect(&counts(&[
            ("s1", "A", 5, 10),
            ("s1", "B", 50, 100),
            ("s2", "A", 2, 10),
            ("s2", "B", 1, 10),
        ]));

        // Pooled: A 7/20, B 51/110 -> B; s1 is tied, s2 alone favours A.
        assert_eq!(verdict.rates.local.segment_count(), 2);
        assert_eq!(verdict.local_optimal_for("s1"), None);
        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.reason, VerdictReason::InsufficientSegments);
        assert!(verdict
            .diagnostics
            .contains(&Diagnostic::TooFewSegments { count: 1 }));
    }

    #[test]
    fn abstain_on_global_tie_is_inconclusive() {
        let verdict = ParadoxDetector::new(TieBreak::Abstain).detect(&counts(&[
            ("s1", "A", 3, 4),
            ("s1", "B", 1, 4),
            ("s2", "A", 1, 4),
            ("s2", "B", 3, 4),
        ]));

        assert!(!verdict.paradox_detected);
        assert_eq!(verdict.global_optimal, None);
        assert_eq!(verdict.reason, VerdictReason::Inconclusive);
        assert!(verdict.diagnostics.contains(&Diagnostic::GlobalTie {
            treatments: vec![label("A"), label("B")],
            resolved_to: None,
        }));
    }

    #[test]
    fn lowest_label_on_global_tie_still_compares() {
        // Pooled rates tie at 1/2, A wins the tie; both segments favour B.
        let verdict = ParadoxDetector::new(TieBreak::LowestLabel).detect(&counts(&[
            ("s1", "A", 2, 10),
            ("s1", "B", 40, 90),
            ("s2", "A", 8, 10),
            ("s2", "B", 10, 10),
        ]));

        assert_eq!(verdict.rates.global.get("A"), verdict.rates.global.get("B"));
        assert_eq!(verdict.global_optimal, Some(label("A")));
        assert_eq!(verdict.local_optimal(), Some(&label("B")));
        assert!(verdict.paradox_detected);
    }

    // Dataset entry point

    #[test]
    fn detect_dataset_reads_count_columns() {
        let dataset = Dataset::builder()
            .column("kidney_stone_size", ["small", "small", "large", "large"])
            .column("treatment", ["A", "B", "A", "B"])
            .column("recovery", [81i64, 234, 192, 55])
            .column("total", [87i64, 270, 263, 80])
            .build()
            .unwrap();
        let columns = CountColumns::new("recovery", "total", "treatment", "kidney_stone_size");

        let verdict = ParadoxDetector::default()
            .detect_dataset(&dataset, &columns)
            .unwrap();
        assert!(verdict.paradox_detected);
    }

    #[test]
    fn detect_dataset_rejects_missing_column() {
        let dataset = Dataset::builder()
            .column("treatment", ["A"])
            .column("recovery", [1i64])
            .column("total", [2i64])
            .build()
            .unwrap();
        let columns = CountColumns::new("recovery", "total", "treatment", "kidney_stone_size");

        assert_eq!(
            ParadoxDetector::default().detect_dataset(&dataset, &columns),
            Err(ValidationError::missing_column("kidney_stone_size"))
        );
    }

    #[test]
    fn detect_dataset_rejects_totals_that_overflow_when_pooled() {
        let dataset = Dataset::builder()
            .column("kidney_stone_size", ["s1", "s2", "s3"])
            .column("treatment", ["A", "A", "B"])
            .column("recovery", [0i64, 0, 0])
            .column("total", [i64::MAX, i64::MAX, i64::MAX])
            .build()
            .unwrap();
        let columns = CountColumns::new("recovery", "total", "treatment", "kidney_stone_size");

        assert_eq!(
            ParadoxDetector::default().detect_dataset(&dataset, &columns),
            Err(ValidationError::CountOverflow {
                segment: "s3".to_string(),
                treatment: "B".to_string(),
            })
        );
    }
}
