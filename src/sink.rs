//! Log sinks — where rendered query records end up
//!
//! A sink receives the rendered message, the resolved level, and the query
//! duration as a structured field. `TracingSink` forwards into `tracing`;
//! `MemorySink` keeps records in memory for development and testing.

use crate::level::Level;
use crate::template::duration_millis;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Target used for every event emitted by [`TracingSink`]
pub const TRACING_TARGET: &str = "a3s_query_log";

/// Trait for leveled log backends
///
/// Called synchronously from the after-query hook, possibly from many
/// threads at once. Any blocking is the implementation's own contract.
pub trait LogSink: Send + Sync {
    /// Emit `message` at `level`, with `duration` attached as a field
    ///
    /// Never called with [`Level::Disabled`].
    fn log(&self, level: Level, message: &str, duration: Duration);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, level: Level, message: &str, duration: Duration) {
        (**self).log(level, message, duration)
    }
}

/// Sink that emits `tracing` events
///
/// `Fatal` and `Panic` have no `tracing` counterpart and are emitted at
/// `ERROR`; the original level is kept in the `severity` field. Neither
/// aborts the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str, duration: Duration) {
        let severity = level.as_str();
        let duration_ms = duration_millis(duration);
        match level {
            Level::Trace => {
                tracing::trace!(target: TRACING_TARGET, severity, duration_ms, "{}", message)
            }
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, severity, duration_ms, "{}", message)
            }
            Level::Info => {
                tracing::info!(target: TRACING_TARGET, severity, duration_ms, "{}", message)
            }
            Level::Warn => {
                tracing::warn!(target: TRACING_TARGET, severity, duration_ms, "{}", message)
            }
            Level::Error | Level::Fatal | Level::Panic => {
                tracing::error!(target: TRACING_TARGET, severity, duration_ms, "{}", message)
            }
            Level::Disabled => {}
        }
    }
}

/// A record captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub duration: Duration,
}

/// In-memory sink for development and testing
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RwLock<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str, duration: Duration) {
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(LogRecord {
                level,
                message: message.to_string(),
                duration,
            });
    }
}
