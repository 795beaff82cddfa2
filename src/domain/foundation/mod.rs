//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the paradox detection domain.

mod errors;
mod ids;
mod label;
mod rate;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AnalysisId;
pub use label::Label;
pub use rate::Rate;
pub use timestamp::Timestamp;
