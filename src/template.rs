//! Message templates
//!
//! Both templates are compiled once into a single `minijinja` environment.
//! Undefined variables are a render error, so a template that references a
//! field the entry does not carry fails loudly instead of printing blanks.

use crate::config::QueryLogConfig;
use crate::error::Result;
use chrono::{DateTime, Utc};
use minijinja::{Environment, UndefinedBehavior};
use serde::{Serialize, Serializer};
use std::time::Duration;

const MESSAGE_TEMPLATE_NAME: &str = "message";
const ERROR_TEMPLATE_NAME: &str = "error";

/// Variables visible to templates
#[derive(Debug, Clone, Serialize)]
pub struct LogEntryVars<'a> {
    /// Wall-clock time the query completed
    pub timestamp: DateTime<Utc>,

    pub query: &'a str,

    pub operation: &'a str,

    /// Human-readable elapsed time, e.g. `5ms` or `1.5s`
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,

    /// Elapsed time in whole milliseconds
    pub duration_ms: u64,

    /// Error text, rendered as an empty string when absent
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<String>,
}

impl<'a> LogEntryVars<'a> {
    pub fn new(
        timestamp: DateTime<Utc>,
        query: &'a str,
        operation: &'a str,
        duration: Duration,
        error: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            query,
            operation,
            duration,
            duration_ms: duration_millis(duration),
            error,
        }
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Stable text form of a duration (`250µs`, `5ms`, `1.5s`)
pub fn format_duration(duration: Duration) -> String {
    format!("{:?}", duration)
}

fn serialize_duration<S: Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*d))
}

fn serialize_error<S: Serializer>(
    error: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(error.as_deref().unwrap_or_default())
}

/// Compiled message and error templates
///
/// Safe to share across threads; rendering takes `&self` only.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile the templates from `config`, falling back to the defaults
    pub fn from_config(config: &QueryLogConfig) -> Result<Self> {
        Self::new(
            config.effective_message_template(),
            config.effective_error_template(),
        )
    }

    /// Compile explicit template sources
    pub fn new(message_template: &str, error_template: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned(MESSAGE_TEMPLATE_NAME, message_template.to_string())?;
        env.add_template_owned(ERROR_TEMPLATE_NAME, error_template.to_string())?;
        Ok(Self { env })
    }

    /// Render `vars` with the error template when `is_error`, else the message template
    pub fn render(&self, vars: &LogEntryVars<'_>, is_error: bool) -> Result<String> {
        let name = if is_error {
            ERROR_TEMPLATE_NAME
        } else {
            MESSAGE_TEMPLATE_NAME
        };
        let rendered = self.env.get_template(name)?.render(vars)?;
        Ok(rendered)
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}
