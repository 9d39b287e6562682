//! Range Source collaborators.
//!
//! Each source hands back the raw CIDR list as text, or fails with
//! [`TableError::FetchFailed`](crate::error::TableError::FetchFailed).
//! - [`http`] - download over HTTP(S)
//! - [`file`] - read a local copy
//! - [`cache`] - daily on-disk cache in front of another source

mod cache;
mod file;
mod http;

pub use cache::{cache_file_name, CachedSource};
pub use file::FileSource;
pub use http::{HttpSource, DEFAULT_SOURCE_URL};

use crate::error::Result;

/// Something that can deliver the raw CIDR list.
#[allow(async_fn_in_trait)]
pub trait RangeSource {
    /// URL or path, for log lines and errors.
    fn name(&self) -> String;

    async fn fetch(&self) -> Result<String>;
}
