//! QueryLogger — turns completed query events into leveled log records
//!
//! Each `after_query` call classifies the event (ok, slow, or error), picks
//! the configured level, renders the matching template, and hands the
//! message to the sink. Nothing is mutated after construction, so one
//! logger can serve concurrent queries without locking.

use crate::config::QueryLogConfig;
use crate::error::Result;
use crate::event::{QueryError, QueryEvent};
use crate::hook::{QueryContext, QueryHook};
use crate::level::Level;
use crate::sink::{LogSink, TracingSink};
use crate::template::{duration_millis, LogEntryVars, Templates};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Query hook that logs every completed query
pub struct QueryLogger {
    config: QueryLogConfig,
    templates: Templates,
    sink: Arc<dyn LogSink>,
}

impl QueryLogger {
    /// Create a logger writing to `sink`
    ///
    /// Empty templates are replaced by the built-in defaults. Fails if
    /// either template does not compile.
    pub fn new(config: QueryLogConfig, sink: impl LogSink + 'static) -> Result<Self> {
        let templates = Templates::from_config(&config)?;

        tracing::debug!(
            slow_threshold_ms = duration_millis(config.slow_threshold),
            query_level = %config.query_level,
            slow_level = %config.slow_level,
            error_level = %config.error_level,
            "Query logger created"
        );

        Ok(Self {
            config,
            templates,
            sink: Arc::new(sink),
        })
    }

    /// Create a logger that emits `tracing` events
    pub fn with_tracing(config: QueryLogConfig) -> Result<Self> {
        Self::new(config, TracingSink)
    }

    pub fn config(&self) -> &QueryLogConfig {
        &self.config
    }

    /// Pick the level for a query that took `duration`
    ///
    /// Returns the level and whether the error template applies. A no-rows
    /// or empty error counts as success.
    pub fn resolve_level(&self, duration: Duration, error: Option<&QueryError>) -> (Level, bool) {
        if error.is_some_and(QueryError::is_failure) {
            return (self.config.error_level, true);
        }
        if self.config.slow_detection_enabled() && duration >= self.config.slow_threshold {
            (self.config.slow_level, false)
        } else {
            (self.config.query_level, false)
        }
    }

    /// No-op; returns `ctx` unchanged
    pub fn before_query(&self, ctx: QueryContext) -> QueryContext {
        ctx
    }

    /// Log a completed query
    ///
    /// Fails only when the template cannot be rendered for this event.
    pub fn after_query(&self, event: &QueryEvent) -> Result<()> {
        let now = Instant::now();
        let duration = now.saturating_duration_since(event.start_time);

        let (level, is_error) = self.resolve_level(duration, event.effective_error());
        if !level.is_enabled() {
            tracing::trace!(is_error, "Query log suppressed by disabled level");
            return Ok(());
        }

        let operation = event.operation();
        let vars = LogEntryVars::new(
            Utc::now(),
            &event.query,
            &operation,
            duration,
            event.error.as_ref().map(ToString::to_string),
        );
        let message = self.templates.render(&vars, is_error)?;

        self.sink.log(level, &message, duration);
        Ok(())
    }
}

impl QueryHook for QueryLogger {
    fn before_query(&self, ctx: QueryContext, _event: &QueryEvent) -> QueryContext {
        QueryLogger::before_query(self, ctx)
    }

    fn after_query(&self, _ctx: &QueryContext, event: &QueryEvent) -> Result<()> {
        QueryLogger::after_query(self, event)
    }
}

impl std::fmt::Debug for QueryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryLogger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
