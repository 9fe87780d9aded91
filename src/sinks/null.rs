//! Null sink: discards every record
//!
//! Useful as a test and benchmark fixture; counts what it discards.

use crate::core::{AtomicLevel, LogLevel, LogRecord, Result, Sink};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct NullSink {
    level: AtomicLevel,
    write_count: AtomicU64,
    flush_count: AtomicU64,
}

impl NullSink {
    pub fn new() -> Self {
        Self {
            level: AtomicLevel::new(LogLevel::Trace),
            write_count: AtomicU64::new(0),
            flush_count: AtomicU64::new(0),
        }
    }

    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    pub fn flush_count(&self) -> u64 {
        self.flush_count.load(Ordering::Relaxed)
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for NullSink {
    fn write(&self, _record: &LogRecord) -> Result<()> {
        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.flush_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level);
    }

    fn level(&self) -> LogLevel {
        self.level.load()
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_counts_writes() {
        let sink = NullSink::new();
        let record = LogRecord::new("app", LogLevel::Info, "discarded".to_string());

        sink.write(&record).expect("null sink never fails");
        sink.write(&record).expect("null sink never fails");
        sink.flush().expect("null sink never fails");

        assert_eq!(sink.write_count(), 2);
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn test_null_sink_level() {
        let sink = NullSink::new();
        sink.set_level(LogLevel::Error);
        assert!(!sink.should_log(LogLevel::Info));
        assert!(sink.should_log(LogLevel::Fatal));
    }
}
