//! Storage Adapters
//!
//! Implementations of the DatasetReader port for loading tabular input.
//!
//! ## Available Adapters
//!
//! - **FileDatasetReader** - Reads JSON or YAML column documents from disk
//! - **InMemoryDatasetReader** - Serves a dataset held in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileDatasetReader, InMemoryDatasetReader};
//!
//! // From disk
//! let reader = FileDatasetReader::new("./data/kidney_stones.yaml");
//!
//! // From memory
//! let reader = InMemoryDatasetReader::new(dataset);
//! ```

mod file_dataset_reader;
mod in_memory_dataset_reader;

pub use file_dataset_reader::{DatasetFormat, FileDatasetReader};
pub use in_memory_dataset_reader::InMemoryDatasetReader;
