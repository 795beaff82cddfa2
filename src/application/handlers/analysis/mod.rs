//! Analysis command handlers.
//!
//! Handlers that validate a dataset, run the paradox check, and return the
//! resulting `ParadoxAnalyzed` record.

mod detect_from_counts;
mod detect_paradox;

pub use detect_from_counts::{
    DetectFromCountsCommand, DetectFromCountsHandler, DetectFromCountsResult,
};
pub use detect_paradox::{DetectParadoxCommand, DetectParadoxHandler, DetectParadoxResult};
