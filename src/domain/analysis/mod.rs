//! Analysis Module - Pure domain services for Simpson's paradox detection.
//!
//! This module contains stateless functions that turn observations into
//! grouped counts and grouped counts into a verdict.
//!
//! # Components
//!
//! - `Aggregator` - Row-level observations -> per-(segment, treatment) counts
//! - `GroupedCounts` - One success/total record per (segment, treatment)
//! - `GlobalRates` / `RateTable` - Pooled and per-segment rates
//! - `ParadoxDetector` - Pooled argmax vs. per-segment argmax comparison
//! - `TieBreak` - Deterministic handling of exactly tied rates
//! - `Verdict` - Boolean result, optima, rate breakdown, diagnostics
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod aggregator;
mod events;
mod grouped_counts;
mod paradox_detector;
mod rate_table;
mod tie_break;
mod verdict;

pub use aggregator::Aggregator;
pub use events::ParadoxAnalyzed;
pub use grouped_counts::{GroupedCount, GroupedCounts};
pub use paradox_detector::ParadoxDetector;
pub use rate_table::{GlobalRates, RateTable};
pub use tie_break::{Selection, TieBreak};
pub use verdict::{Diagnostic, RateBreakdown, Verdict, VerdictReason};
