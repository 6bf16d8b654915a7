//! # a3s-query-log
//!
//! Template-driven, leveled logging of ORM query lifecycle events.
//!
//! ## Overview
//!
//! `a3s-query-log` plugs into an ORM's query hooks. For every completed
//! query it measures the elapsed time, classifies the outcome (ok, slow, or
//! error), renders a message from a configurable template, and emits it at
//! the configured level.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_query_log::{Level, QueryEvent, QueryKind, QueryLogConfig, QueryLogger};
//! use std::time::Duration;
//!
//! # fn example() -> a3s_query_log::Result<()> {
//! let config = QueryLogConfig::default()
//!     .with_slow_threshold(Duration::from_millis(200))
//!     .with_query_level(Level::Debug)
//!     .with_slow_level(Level::Warn);
//!
//! // Emits `tracing` events under the `a3s_query_log` target
//! let logger = QueryLogger::with_tracing(config)?;
//!
//! let event = QueryEvent::new("SELECT * FROM users").with_kind(QueryKind::Select);
//! logger.after_query(&event)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Templates
//!
//! Templates use `minijinja` syntax and see `timestamp`, `query`,
//! `operation`, `duration`, `duration_ms`, and `error`. Referencing any
//! other variable is a render error. `error` is an empty string when the
//! query carried no error.
//!
//! ## Architecture
//!
//! - **QueryHook** trait — before/after callbacks an ORM adapter invokes
//! - **QueryHooks** — registry for ORM adapters that fan one query out to
//!   several hooks; applications only need `QueryLogger`
//! - **QueryLogger** — the hook that classifies, renders, and emits
//! - **LogSink** trait — leveled destination (`TracingSink`, `MemorySink`)
//! - **QueryEvent** — the completed query as reported by the adapter

pub mod config;
pub mod error;
pub mod event;
pub mod hook;
pub mod level;
pub mod logger;
pub mod sink;
pub mod template;

// Re-export core types
pub use config::{QueryLogConfig, DEFAULT_ERROR_TEMPLATE, DEFAULT_MESSAGE_TEMPLATE};
pub use error::{QueryLogError, Result};
pub use event::{query_operation, QueryError, QueryEvent, QueryKind};
pub use hook::{QueryContext, QueryHook, QueryHooks};
pub use level::Level;
pub use logger::QueryLogger;
pub use sink::{LogRecord, LogSink, MemorySink, TracingSink};
pub use template::{LogEntryVars, Templates};
