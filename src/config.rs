//! Query logger configuration
//!
//! Immutable once handed to [`QueryLogger::new`](crate::QueryLogger::new).
//! Serializes with camelCase keys; the slow threshold travels as integer
//! milliseconds (`slowThresholdMs`).

use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Template used for successful (and slow) queries when none is configured
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "{{ operation }}[{{ duration }}]: {{ query }}";

/// Template used for failed queries when none is configured
pub const DEFAULT_ERROR_TEMPLATE: &str = "{{ operation }}[{{ duration }}]: {{ query }}: {{ error }}";

/// Levels, slow-query threshold, and message templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryLogConfig {
    /// Queries at or above this duration use `slow_level` (zero disables)
    #[serde(rename = "slowThresholdMs", with = "duration_ms")]
    pub slow_threshold: Duration,

    /// Level for successful queries
    pub query_level: Level,

    /// Level for successful queries that crossed `slow_threshold`
    pub slow_level: Level,

    /// Level for failed queries
    pub error_level: Level,

    /// Template for successful queries; empty means [`DEFAULT_MESSAGE_TEMPLATE`]
    pub message_template: String,

    /// Template for failed queries; empty means [`DEFAULT_ERROR_TEMPLATE`]
    pub error_template: String,
}

impl Default for QueryLogConfig {
    fn default() -> Self {
        Self {
            slow_threshold: Duration::ZERO,
            query_level: Level::Debug,
            slow_level: Level::Warn,
            error_level: Level::Error,
            message_template: String::new(),
            error_template: String::new(),
        }
    }
}

impl QueryLogConfig {
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    pub fn with_query_level(mut self, level: Level) -> Self {
        self.query_level = level;
        self
    }

    pub fn with_slow_level(mut self, level: Level) -> Self {
        self.slow_level = level;
        self
    }

    pub fn with_error_level(mut self, level: Level) -> Self {
        self.error_level = level;
        self
    }

    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = template.into();
        self
    }

    pub fn with_error_template(mut self, template: impl Into<String>) -> Self {
        self.error_template = template.into();
        self
    }

    /// Configured message template, or the built-in default when empty
    pub fn effective_message_template(&self) -> &str {
        if self.message_template.is_empty() {
            DEFAULT_MESSAGE_TEMPLATE
        } else {
            &self.message_template
        }
    }

    /// Configured error template, or the built-in default when empty
    pub fn effective_error_template(&self) -> &str {
        if self.error_template.is_empty() {
            DEFAULT_ERROR_TEMPLATE
        } else {
            &self.error_template
        }
    }

    /// Whether slow-query detection is active
    pub fn slow_detection_enabled(&self) -> bool {
        !self.slow_threshold.is_zero()
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(crate::template::duration_millis(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
