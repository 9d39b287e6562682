//! Local file Range Source.

use super::RangeSource;
use crate::error::{Result, TableError};
use std::path::PathBuf;

/// Reads the CIDR list from a file, for offline or reproducible builds.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl RangeSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        log::info!("Reading CIDR list from file: {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| TableError::FetchFailed {
                source_name: self.name(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_sample() {
        let text = FileSource::new("src/tests/test_data/cidr_sample.txt")
            .fetch()
            .await
            .expect("Error reading sample list");
        assert!(text.starts_with("1.0.1.0/24\n"));
        assert_eq!(text.split_whitespace().count(), 10);
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let err = FileSource::new("src/tests/test_data/does_not_exist.txt")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, TableError::FetchFailed { .. }));
    }
}
