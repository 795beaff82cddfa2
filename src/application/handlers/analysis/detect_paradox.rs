//! DetectParadoxHandler - Command handler for individual-level datasets.
//!
//! Aggregates one row per observation into grouped counts, then runs the
//! paradox check on them.

use tracing::{debug, info};

use crate::domain::analysis::{Aggregator, ParadoxAnalyzed, ParadoxDetector};
use crate::domain::dataset::{Dataset, ObservationColumns};
use crate::domain::foundation::DomainError;

/// Command to check an individual-level dataset for Simpson's paradox.
#[derive(Debug, Clone)]
pub struct DetectParadoxCommand {
    pub dataset: Dataset,
    pub columns: ObservationColumns,
}

/// Result of a successful check.
pub type DetectParadoxResult = ParadoxAnalyzed;

/// Handler for individual-level paradox checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectParadoxHandler {
    detector: ParadoxDetector,
}

impl DetectParadoxHandler {
    pub fn new(detector: ParadoxDetector) -> Self {
        Self { detector }
    }

    pub fn handle(&self, cmd: DetectParadoxCommand) -> Result<DetectParadoxResult, DomainError> {
        // 1. Aggregate rows into (segment, treatment) counts
        let counts = Aggregator::aggregate(&cmd.dataset, &cmd.columns)?;
        debug!(
            rows = cmd.dataset.row_count(),
            groups = counts.len(),
            "Aggregated observations"
        );

        // 2. Detect
        let verdict = self.detector.detect(&counts);
        let analysis = ParadoxAnalyzed::new(counts, verdict);

        info!(
            analysis_id = %analysis.analysis_id,
            paradox_detected = analysis.paradox_detected(),
            reason = ?analysis.verdict.reason,
            diagnostics = analysis.verdict.diagnostics.len(),
            "Paradox check completed"
        );

        Ok(analysis)
    }
}
