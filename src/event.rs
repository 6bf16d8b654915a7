//! Query lifecycle events handed over by the ORM adapter
//!
//! The adapter owns the event; the logger only borrows it for the duration
//! of a single hook call.

use std::fmt;
use std::time::Instant;

/// Longest operation name produced by the text heuristic, in characters
pub const MAX_OPERATION_LEN: usize = 16;

/// Structural class of the executed query, when the ORM knows it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    CreateTable,
    DropTable,
    /// Raw SQL or a query class the adapter does not map
    #[default]
    Unknown,
}

impl QueryKind {
    /// Operation verb for this kind, `None` for `Unknown`
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            QueryKind::Select => Some("SELECT"),
            QueryKind::Insert => Some("INSERT"),
            QueryKind::Update => Some("UPDATE"),
            QueryKind::Delete => Some("DELETE"),
            QueryKind::CreateTable => Some("CREATE TABLE"),
            QueryKind::DropTable => Some("DROP TABLE"),
            QueryKind::Unknown => None,
        }
    }
}

/// Error reported by the ORM for an executed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query succeeded but matched no rows
    NoRows,

    /// The query failed
    Failed(String),
}

impl QueryError {
    /// Wrap any displayable driver error
    pub fn failed(err: impl fmt::Display) -> Self {
        QueryError::Failed(err.to_string())
    }

    pub fn is_no_rows(&self) -> bool {
        matches!(self, QueryError::NoRows)
    }

    /// Whether this error marks the query as failed
    ///
    /// `NoRows` and empty failure messages do not.
    pub fn is_failure(&self) -> bool {
        matches!(self, QueryError::Failed(msg) if !msg.is_empty())
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::NoRows => f.write_str("no rows found"),
            QueryError::Failed(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for QueryError {}

/// A completed query, as reported by the ORM
#[derive(Debug, Clone)]
pub struct QueryEvent {
    /// SQL text as executed
    pub query: String,

    /// When execution started (monotonic)
    pub start_time: Instant,

    /// Structural kind, `Unknown` when the adapter cannot tell
    pub kind: QueryKind,

    /// Error returned by the driver, if any
    pub error: Option<QueryError>,
}

impl QueryEvent {
    /// Create an event for `query` that started now
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start_time: Instant::now(),
            kind: QueryKind::Unknown,
            error: None,
        }
    }

    pub fn with_kind(mut self, kind: QueryKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_error(mut self, error: QueryError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn started_at(mut self, start_time: Instant) -> Self {
        self.start_time = start_time;
        self
    }

    /// The error that should be treated as a failure
    ///
    /// `NoRows` and empty failure messages count as success.
    pub fn effective_error(&self) -> Option<&QueryError> {
        self.error.as_ref().filter(|err| err.is_failure())
    }

    /// Short verb describing the query
    ///
    /// Uses the structural kind when known, the query text otherwise.
    pub fn operation(&self) -> String {
        match self.kind.operation() {
            Some(op) => op.to_string(),
            None => query_operation(&self.query),
        }
    }
}

/// Derive an operation name from raw query text
///
/// First whitespace-delimited token, capped at [`MAX_OPERATION_LEN`] characters.
pub fn query_operation(query: &str) -> String {
    let token = query
        .trim_start()
        .split(char::is_whitespace)
        .next()
        .unwrap_or_default();
    token.chars().take(MAX_OPERATION_LEN).collect()
}
