//! Verdict Renderer Port - Interface for presenting analysis results.

use crate::domain::analysis::ParadoxAnalyzed;

/// Errors that can occur while rendering a verdict
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize analysis: {0}")]
    SerializationFailed(String),
}

/// Port for turning a completed analysis into presentable output
pub trait VerdictRenderer: Send + Sync {
    /// Render the analysis, including its rate tables and diagnostics
    fn render(&self, analysis: &ParadoxAnalyzed) -> Result<String, RenderError>;
}
