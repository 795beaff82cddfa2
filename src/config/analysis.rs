//! Analysis configuration

use serde::Deserialize;

use crate::domain::analysis::{ParadoxDetector, TieBreak};

/// Settings for the paradox detector
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnalysisConfig {
    /// How exactly tied rates are resolved (`lowest_label` or `abstain`)
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl AnalysisConfig {
    /// Build a detector with these settings
    pub fn detector(&self) -> ParadoxDetector {
        ParadoxDetector::new(self.tie_break)
    }
}
