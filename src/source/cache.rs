//! Daily on-disk cache in front of a Range Source.

use super::RangeSource;
use crate::error::{Result, TableError};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Cache file name for the given day, `range_cache_<YYYY-MM-DD>.txt`.
pub fn cache_file_name(day: NaiveDate) -> String {
    format!("range_cache_{}.txt", day.format("%Y-%m-%d"))
}

/// Serves the list from today's cache file, fetching and storing it on a miss.
#[derive(Debug, Clone)]
pub struct CachedSource<S> {
    inner: S,
    cache_dir: PathBuf,
    cache_file: Option<PathBuf>,
}

impl<S: RangeSource> CachedSource<S> {
    pub fn new(inner: S, cache_dir: impl Into<PathBuf>) -> Self {
        CachedSource {
            inner,
            cache_dir: cache_dir.into(),
            cache_file: None,
        }
    }

    /// Use a specific cache file, which must already exist and be readable.
    ///
    /// The inner source is never asked and the file is never written.
    pub fn with_cache_file(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(cache_file.into());
        self
    }

    fn todays_cache_file(&self) -> PathBuf {
        let today = chrono::Utc::now().date_naive();
        self.cache_dir.join(cache_file_name(today))
    }
}

impl<S: RangeSource> RangeSource for CachedSource<S> {
    fn name(&self) -> String {
        format!("{} (cached in {})", self.inner.name(), self.cache_dir.display())
    }

    async fn fetch(&self) -> Result<String> {
        if let Some(file) = &self.cache_file {
            log::info!("Using provided cache file: {}", file.display());
            return tokio::fs::read_to_string(file)
                .await
                .map_err(|e| cache_failed(file, e));
        }

        let cache_file = self.todays_cache_file();
        match tokio::fs::read_to_string(&cache_file).await {
            Ok(text) => {
                log::info!("Reading from cache file: {}", cache_file.display());
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("Cache file not found: {}", cache_file.display());
                let text = self.inner.fetch().await?;

                tokio::fs::create_dir_all(&self.cache_dir).await?;
                log::warn!("Writing data to cache file: {}", cache_file.display());
                tokio::fs::write(&cache_file, &text).await?;
                Ok(text)
            }
            Err(e) => Err(cache_failed(&cache_file, e)),
        }
    }
}

fn cache_failed(file: &Path, e: std::io::Error) -> TableError {
    log::error!("Cannot read cache file {}: {}", file.display(), e);
    TableError::FetchFailed {
        source_name: file.display().to_string(),
        reason: format!("cache file unreadable: {e}"),
    }
}
