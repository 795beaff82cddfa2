//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DatasetReader` - Where the tabular input comes from
//! - `VerdictRenderer` - How a completed analysis is presented

mod dataset_reader;
mod verdict_renderer;

pub use dataset_reader::{DatasetReadError, DatasetReader};
pub use verdict_renderer::{RenderError, VerdictRenderer};
