//! Report Adapters
//!
//! Implementations of the VerdictRenderer port.
//!
//! - **TextVerdictRenderer** - Console report with rate tables and diagnostics
//! - **JsonVerdictRenderer** - Machine-readable analysis record

mod json_verdict_renderer;
mod text_verdict_renderer;

pub use json_verdict_renderer::JsonVerdictRenderer;
pub use text_verdict_renderer::TextVerdictRenderer;
