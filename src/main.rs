//! `simpsons-paradox` - Report whether a dataset exhibits Simpson's paradox.
//!
//! Usage: `simpsons-paradox [DATASET]`
//!
//! Without an argument the classic kidney-stone sample is analyzed. With a
//! path, a JSON or YAML column table is loaded. Tables carrying the configured
//! `total` column are treated as pre-aggregated counts.

use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use simpsons_paradox::adapters::{FileDatasetReader, InMemoryDatasetReader};
use simpsons_paradox::application::{
    DetectFromCountsCommand, DetectFromCountsHandler, DetectParadoxCommand, DetectParadoxHandler,
};
use simpsons_paradox::config::AppConfig;
use simpsons_paradox::domain::analysis::ParadoxAnalyzed;
use simpsons_paradox::domain::dataset::{Dataset, Observation};
use simpsons_paradox::domain::foundation::{DomainError, ErrorCode};
use simpsons_paradox::ports::{DatasetReader, VerdictRenderer};

fn main() -> ExitCode {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.output.log_level));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        eprintln!("Failed to initialize logging");
        return ExitCode::FAILURE;
    }

    let analysis = match run(&config, std::env::args().nth(1)) {
        Ok(analysis) => analysis,
        Err(e) => {
            error!(code = %e.code, details = ?e.details, "{}", e.message);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.output.renderer().render(&analysis) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render report: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig, path: Option<String>) -> Result<ParadoxAnalyzed, DomainError> {
    let reader: Box<dyn DatasetReader> = match path {
        Some(path) => Box::new(FileDatasetReader::new(path)),
        None => Box::new(InMemoryDatasetReader::new(kidney_stone_sample(config)?)),
    };
    let dataset = reader.read()?;
    let detector = config.analysis.detector();

    if dataset.has_column(&config.columns.total) {
        debug!(column = %config.columns.total, "Dataset is pre-aggregated");
        DetectFromCountsHandler::new(detector).handle(DetectFromCountsCommand {
            dataset,
            columns: config.columns.count_columns(),
        })
    } else {
        DetectParadoxHandler::new(detector).handle(DetectParadoxCommand {
            dataset,
            columns: config.columns.observation_columns(),
        })
    }
}

/// The kidney-stone treatment study, one row per patient.
fn kidney_stone_sample(config: &AppConfig) -> Result<Dataset, DomainError> {
    let groups = [
        ("A", "small", 81, 6),
        ("B", "small", 234, 36),
        ("B", "large", 55, 25),
        ("A", "large", 192, 71),
    ];

    let mut observations = Vec::new();
    for (treatment, segment, recovered, not_recovered) in groups {
        observations.extend(Observation::repeated(recovered, true, treatment, segment));
        observations.extend(Observation::repeated(not_recovered, false, treatment, segment));
    }

    Dataset::from_observations(&observations, &config.columns.observation_columns())
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))
}
