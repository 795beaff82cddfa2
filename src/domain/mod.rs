//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (labels, rates, IDs, errors)
//! - `dataset` - Column-oriented tabular input and typed observations
//! - `analysis` - Pure domain services for paradox detection (aggregation, rates, verdict)

pub mod analysis;
pub mod dataset;
pub mod foundation;
