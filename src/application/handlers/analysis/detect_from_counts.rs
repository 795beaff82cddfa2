//! DetectFromCountsHandler - Command handler for pre-aggregated datasets.

use tracing::{debug, info, warn};

use crate::domain::analysis::{GroupedCounts, ParadoxAnalyzed, ParadoxDetector};
use crate::domain::dataset::{CountColumns, Dataset};
use crate::domain::foundation::DomainError;

/// Command to check a dataset holding one row per (segment, treatment) group.
#[derive(Debug, Clone)]
pub struct DetectFromCountsCommand {
    pub dataset: Dataset,
    pub columns: CountColumns,
}

/// Result of a successful check.
pub type DetectFromCountsResult = ParadoxAnalyzed;

/// Handler for paradox checks over grouped counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectFromCountsHandler {
    detector: ParadoxDetector,
}

impl DetectFromCountsHandler {
    pub fn new(detector: ParadoxDetector) -> Self {
        Self { detector }
    }

    pub fn handle(
        &self,
        cmd: DetectFromCountsCommand,
    ) -> Result<DetectFromCountsResult, DomainError> {
        let counts = GroupedCounts::from_dataset(&cmd.dataset, &cmd.columns)?;
        debug!(groups = counts.len(), "Loaded grouped counts");

        let analysis = self.analyze(counts);
        for diagnostic in &analysis.verdict.diagnostics {
            warn!(analysis_id = %analysis.analysis_id, "{}", diagnostic);
        }
        Ok(analysis)
    }

    /// Runs the check on counts that are already validated.
    pub fn analyze(&self, counts: GroupedCounts) -> DetectFromCountsResult {
        let verdict = self.detector.detect(&counts);
        let analysis = ParadoxAnalyzed::new(counts, verdict);

        info!(
            analysis_id = %analysis.analysis_id,
            paradox_detected = analysis.paradox_detected(),
            reason = ?analysis.verdict.reason,
            "Paradox check completed"
        );

        analysis
    }
}
