//! Sink trait for log output destinations
//!
//! Sinks are shared handles: one sink may be attached to several loggers and
//! written by several worker threads at once, so every method takes `&self`
//! and implementations use interior mutability for their own state.

use super::{error::Result, log_level::LogLevel, record::LogRecord};
use std::sync::Arc;

pub trait Sink: Send + Sync {
    fn write(&self, record: &LogRecord) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn set_level(&self, level: LogLevel);
    fn level(&self) -> LogLevel;
    fn name(&self) -> &str;

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

/// Shared sink handle; lifetime = longest holder.
pub type SinkHandle = Arc<dyn Sink>;
