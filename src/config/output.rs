//! Output configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;
use crate::adapters::{JsonVerdictRenderer, TextVerdictRenderer};
use crate::ports::VerdictRenderer;

/// Report format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for rates in text reports
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl OutputConfig {
    /// Build the renderer for the configured format
    pub fn renderer(&self) -> Box<dyn VerdictRenderer> {
        match self.format {
            OutputFormat::Text => Box::new(TextVerdictRenderer::new(self.precision)),
            OutputFormat::Json => Box::new(JsonVerdictRenderer::new(true)),
        }
    }

    /// Validate output configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.precision == 0 || self.precision > 12 {
            return Err(ValidationError::InvalidPrecision);
        }
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))?;
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
            log_level: default_log_level(),
        }
    }
}

fn default_precision() -> usize {
    4
}

fn default_log_level() -> String {
    "info,simpsons_paradox=debug".to_string()
}
