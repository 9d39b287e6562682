//! Error types for table generation.

use thiserror::Error;

/// Result alias used by the parsing, building and emitting stages.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while fetching, compiling or emitting a range table.
#[derive(Error, Debug)]
pub enum TableError {
    /// A token failed structural validation as an IPv4 CIDR block.
    #[error("malformed CIDR '{token}': {reason}")]
    MalformedCidr {
        /// The offending token as it appeared in the input.
        token: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The Range Source could not deliver the raw list.
    #[error("fetch from {source_name} failed: {reason}")]
    FetchFailed {
        /// URL or path the list was requested from.
        source_name: String,
        /// Status code or transport error.
        reason: String,
    },

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        TableError::MalformedCidr {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let e = TableError::malformed("1.2.3", "missing '/'");
        assert_eq!(e.to_string(), "malformed CIDR '1.2.3': missing '/'");
    }

    #[test]
    fn test_fetch_failed_display() {
        let e = TableError::FetchFailed {
            source_name: "https://example.invalid/list.txt".to_string(),
            reason: "status code 404".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "fetch from https://example.invalid/list.txt failed: status code 404"
        );
    }
}
