//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Dataset readers (file, in-memory)
//! - `report` - Verdict renderers (text, JSON)

pub mod report;
pub mod storage;

pub use report::{JsonVerdictRenderer, TextVerdictRenderer};
pub use storage::{DatasetFormat, FileDatasetReader, InMemoryDatasetReader};
