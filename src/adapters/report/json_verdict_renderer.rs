//! JSON Verdict Renderer
//!
//! Serializes the whole analysis record so other tools can consume the
//! verdict, rate tables and diagnostics.

use crate::domain::analysis::ParadoxAnalyzed;
use crate::ports::{RenderError, VerdictRenderer};

/// Renders a verdict as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonVerdictRenderer {
    pretty: bool,
}

impl JsonVerdictRenderer {
    /// Create a renderer; `pretty` selects indented output
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl VerdictRenderer for JsonVerdictRenderer {
    fn render(&self, analysis: &ParadoxAnalyzed) -> Result<String, RenderError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(analysis)
        } else {
            serde_json::to_string(analysis)
        };
        rendered.map_err(|e| RenderError::SerializationFailed(e.to_string()))
    }
}
