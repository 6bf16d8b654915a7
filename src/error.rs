//! Error types for a3s-query-log

use thiserror::Error;

/// Errors raised by the query logger
///
/// Every variant signals a misconfigured deployment rather than a transient
/// condition. Callers are expected to propagate them, not retry.
#[derive(Debug, Error)]
pub enum QueryLogError {
    /// Template failed to compile or to render
    #[error("Template error: {0}")]
    Template(String),

    /// Severity name outside the supported set
    #[error("Unsupported level: '{0}'")]
    UnsupportedLevel(String),
}

impl From<minijinja::Error> for QueryLogError {
    fn from(e: minijinja::Error) -> Self {
        QueryLogError::Template(e.to_string())
    }
}

/// Result type alias for query log operations
pub type Result<T> = std::result::Result<T, QueryLogError>;
