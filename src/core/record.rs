//! Log record structure

use super::log_level::LogLevel;
use super::scope_tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(std::thread::current().name().map(String::from));
        }
        cache
            .as_ref()
            .expect("thread_name cache initialized in previous line")
            .clone()
    })
}

/// One log event, captured on the producing thread.
///
/// The record is fully self-contained: timestamp, thread identity, and the
/// thread's scoped tag are all taken at construction time, so a worker thread
/// formatting the record later sees the producer's context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub logger_name: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(logger_name: &str, level: LogLevel, message: String) -> Self {
        Self {
            logger_name: logger_name.to_string(),
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            tag: scope_tag::current_tag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scope_tag::ScopedTag;

    #[test]
    fn test_message_sanitized() {
        let record = LogRecord::new(
            "app",
            LogLevel::Info,
            "line one\nFAKE ENTRY\ttabbed".to_string(),
        );
        assert!(!record.message.contains('\n'));
        assert!(!record.message.contains('\t'));
        assert!(record.message.contains("\\n"));
    }

    #[test]
    fn test_record_captures_scoped_tag() {
        let before = LogRecord::new("app", LogLevel::Info, "no tag".to_string());
        assert_eq!(before.tag, None);

        let _guard = ScopedTag::new("session-7");
        let tagged = LogRecord::new("app", LogLevel::Info, "tagged".to_string());
        assert_eq!(tagged.tag.as_deref(), Some("session-7"));
    }

    #[test]
    fn test_record_serializes() {
        let record = LogRecord::new("app", LogLevel::Warn, "disk low".to_string());
        let json = serde_json::to_string(&record).expect("record should serialize");
        assert!(json.contains("\"WARN\"") || json.contains("\"Warn\""));
        assert!(json.contains("disk low"));
    }
}
