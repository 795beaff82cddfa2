//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    DetectFromCountsCommand, DetectFromCountsHandler, DetectFromCountsResult,
    DetectParadoxCommand, DetectParadoxHandler, DetectParadoxResult,
};
