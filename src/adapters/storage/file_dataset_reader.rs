//! File-based Dataset Reader Adapter
//!
//! Reads a column-oriented dataset document from disk. The format is
//! chosen by file extension: `.json`, or `.yaml` / `.yml`.
//!
//! ```yaml
//! treatment: [A, A, B]
//! kidney_stone_size: [small, large, small]
//! recovery: [1, 0, 1]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::dataset::Dataset;
use crate::ports::{DatasetReadError, DatasetReader};

/// Supported on-disk document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Yaml,
}

impl DatasetFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, DatasetReadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(DatasetFormat::Json),
            Some("yaml") | Some("yml") => Ok(DatasetFormat::Yaml),
            Some(other) => Err(DatasetReadError::UnsupportedFormat(other.to_string())),
            None => Err(DatasetReadError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Reads a dataset from a JSON or YAML file
#[derive(Debug, Clone)]
pub struct FileDatasetReader {
    path: PathBuf,
}

impl FileDatasetReader {
    /// Create a reader for the given file
    ///
    /// # Example
    /// ```ignore
    /// let reader = FileDatasetReader::new("./data/kidney_stones.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path this reader loads
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetReader for FileDatasetReader {
    fn read(&self) -> Result<Dataset, DatasetReadError> {
        let format = DatasetFormat::from_path(&self.path)?;

        if !self.path.exists() {
            return Err(DatasetReadError::NotFound(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| DatasetReadError::IoError(e.to_string()))?;

        let dataset: Dataset = match format {
            DatasetFormat::Json => serde_json::from_str(&contents)
                .map_err(|e| DatasetReadError::DeserializationFailed(e.to_string()))?,
            DatasetFormat::Yaml => serde_yaml::from_str(&contents)
                .map_err(|e| DatasetReadError::DeserializationFailed(e.to_string()))?,
        };

        tracing::debug!(
            path = %self.path.display(),
            rows = dataset.row_count(),
            "Loaded dataset"
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Value;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("a.json")).unwrap(),
            DatasetFormat::Json
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("a.YML")).unwrap(),
            DatasetFormat::Yaml
        );
        assert!(matches!(
            DatasetFormat::from_path(Path::new("a.csv")),
            Err(DatasetReadError::UnsupportedFormat(ext)) if ext == "csv"
        ));
        assert!(DatasetFormat::from_path(Path::new("data")).is_err());
    }

    #[test]
    fn test_reads_json_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "rows.json",
            r#"{"treatment": ["A", "B"], "kidney_stone_size": ["small", "large"], "recovery": [1, 0]}"#,
        );

        let dataset = FileDatasetReader::new(&path).read().unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.column("recovery").unwrap(),
            &[Value::Int(1), Value::Int(0)]
        );
    }

    #[test]
    fn test_reads_yaml_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "counts.yaml",
            "treatment: [A, B]\nkidney_stone_size: [small, small]\nrecovery: [81, 234]\ntotal: [87, 270]\n",
        );

        let dataset = FileDatasetReader::new(&path).read().unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.column("treatment").unwrap(),
            &[Value::from("A"), Value::from("B")]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let reader = FileDatasetReader::new(dir.path().join("absent.json"));

        assert!(matches!(reader.read(), Err(DatasetReadError::NotFound(_))));
    }

    #[test]
    fn test_ragged_document_fails_to_deserialize() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", r#"{"a": [1, 2], "b": [1]}"#);

        assert!(matches!(
            FileDatasetReader::new(&path).read(),
            Err(DatasetReadError::DeserializationFailed(_))
        ));
    }
}
