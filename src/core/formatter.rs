//! Record formatting
//!
//! Formatters are pure: render a record to text, no shared state. Sinks own
//! their formatter, so two sinks attached to the same logger may render the
//! same record differently.

use super::{error::Result, record::LogRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standardized timestamp format options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

pub trait Formatter: Send + Sync {
    /// Render a record into `dest`. No trailing newline; the sink decides
    /// line termination.
    fn format(&self, record: &LogRecord, dest: &mut String) -> Result<()>;
}

/// Default text formatter: `[timestamp] [LEVEL] [thread] [tag] message`
pub struct FullFormatter {
    timestamp_format: TimestampFormat,
}

impl FullFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for FullFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for FullFormatter {
    fn format(&self, record: &LogRecord, dest: &mut String) -> Result<()> {
        use std::fmt::Write;

        let thread = record.thread_name.as_ref().unwrap_or(&record.thread_id);
        write!(
            dest,
            "[{}] [{:5}] [{}]",
            self.timestamp_format.format(&record.timestamp),
            record.level.to_str(),
            thread,
        )
        .map_err(|e| super::error::LoggerError::other(e.to_string()))?;

        if let Some(ref tag) = record.tag {
            dest.push_str(" [");
            dest.push_str(tag);
            dest.push(']');
        }

        dest.push(' ');
        dest.push_str(&record.message);
        Ok(())
    }
}

/// One JSON object per record (JSONL), for log aggregation tools.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord, dest: &mut String) -> Result<()> {
        dest.push_str(&serde_json::to_string(record)?);
        Ok(())
    }
}
