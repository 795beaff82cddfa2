//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SIMPSONS_PARADOX` prefix and nested values use double underscores as separators.
//!
//! Every value has a default, so an empty environment yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use simpsons_paradox::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Segment column: {}", config.columns.segment);
//! ```

mod analysis;
mod columns;
mod error;
mod output;

pub use analysis::AnalysisConfig;
pub use columns::ColumnsConfig;
pub use error::{ConfigError, ValidationError};
pub use output::{OutputConfig, OutputFormat};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Detector settings (tie handling)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Dataset column names
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Report format and logging
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SIMPSONS_PARADOX` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SIMPSONS_PARADOX__ANALYSIS__TIE_BREAK=abstain` -> `analysis.tie_break = abstain`
    /// - `SIMPSONS_PARADOX__COLUMNS__SEGMENT=age_band` -> `columns.segment = age_band`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SIMPSONS_PARADOX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.columns.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::TieBreak;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("SIMPSONS_PARADOX__ANALYSIS__TIE_BREAK");
        env::remove_var("SIMPSONS_PARADOX__COLUMNS__SEGMENT");
        env::remove_var("SIMPSONS_PARADOX__COLUMNS__TREATMENT");
        env::remove_var("SIMPSONS_PARADOX__OUTPUT__FORMAT");
        env::remove_var("SIMPSONS_PARADOX__OUTPUT__PRECISION");
    }

    #[test]
    fn test_load_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.analysis.tie_break, TieBreak::LowestLabel);
        assert_eq!(config.columns.outcome, "recovery");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIMPSONS_PARADOX__ANALYSIS__TIE_BREAK", "abstain");
        env::set_var("SIMPSONS_PARADOX__COLUMNS__SEGMENT", "age_band");
        env::set_var("SIMPSONS_PARADOX__OUTPUT__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analysis.tie_break, TieBreak::Abstain);
        assert_eq!(config.columns.segment, "age_band");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_validated_rejects_duplicate_columns() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIMPSONS_PARADOX__COLUMNS__SEGMENT", "treatment");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::DuplicateColumnName(_)))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_tie_break() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIMPSONS_PARADOX__ANALYSIS__TIE_BREAK", "coin_flip");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
