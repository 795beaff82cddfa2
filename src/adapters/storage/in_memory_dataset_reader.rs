//! In-Memory Dataset Reader Adapter
//!
//! Serves a dataset held in memory. Useful for testing and for callers
//! that build their data programmatically.

use crate::domain::dataset::Dataset;
use crate::ports::{DatasetReadError, DatasetReader};

/// Dataset reader backed by an owned dataset
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetReader {
    dataset: Dataset,
}

impl InMemoryDatasetReader {
    /// Create a reader that always returns `dataset`
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetReader for InMemoryDatasetReader {
    fn read(&self) -> Result<Dataset, DatasetReadError> {
        Ok(self.dataset.clone())
    }
}
