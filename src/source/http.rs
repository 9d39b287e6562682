//! HTTP Range Source.

use super::RangeSource;
use crate::error::{Result, TableError};
use colored::Colorize;

/// List of China Telecom routed prefixes.
pub const DEFAULT_SOURCE_URL: &str = "https://ispip.clang.cn/chinatelecom_cidr.txt";

/// Downloads the CIDR list with a single GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSource { url: url.into() }
    }

    fn failed(&self, reason: impl ToString) -> TableError {
        TableError::FetchFailed {
            source_name: self.url.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        HttpSource::new(DEFAULT_SOURCE_URL)
    }
}

impl RangeSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        log::info!("GET {}", self.url.on_blue());
        let response = reqwest::get(&self.url).await.map_err(|e| {
            log::error!("Request to {} failed: {}", self.url, e);
            self.failed(e)
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            log::warn!("{} returned {}", self.url, status.as_str().on_red());
            return Err(self.failed(format!("status code is {}", status.as_u16())));
        }

        let body = response.text().await.map_err(|e| self.failed(e))?;
        log::debug!("Received {} bytes from {}", body.len(), self.url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // port 9 on localhost is discard; nothing answers HTTP there
        let source = HttpSource::new("http://127.0.0.1:9/cidr.txt");
        match source.fetch().await {
            Err(TableError::FetchFailed { source_name, .. }) => {
                assert_eq!(source_name, "http://127.0.0.1:9/cidr.txt")
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_source_bad_url() {
        let source = HttpSource::new("not a url");
        assert!(matches!(
            source.fetch().await,
            Err(TableError::FetchFailed { .. })
        ));
    }

    #[test]
    fn test_http_source_default_url() {
        assert_eq!(HttpSource::default().name(), DEFAULT_SOURCE_URL);
    }
}
