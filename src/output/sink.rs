//! Output Sink writing the generated table to a file.

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes the emitted table to `path`.
///
/// Content goes to a uniquely named temp file in the target directory and is
/// renamed into place, so an interrupted run never leaves a truncated table
/// behind and concurrent runs do not share a scratch file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, text: &str) -> Result<()> {
        let dir = match self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                dir
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        log::debug!("Writing {} bytes to {}", text.len(), tmp.path().display());
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        log::info!("Wrote table to {}", self.path.display());
        Ok(())
    }
}
