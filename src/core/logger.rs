//! Logger implementation
//!
//! One logger type covers both flavors: a synchronous logger writes its sinks
//! inline on the caller's thread, an asynchronous logger is simply constructed
//! with a handle to the shared worker pool and enqueues instead. Workers later
//! drive the same synchronous sink-write path.

use super::{
    error::{LoggerError, Result},
    log_level::{AtomicLevel, LogLevel},
    record::LogRecord,
    sink::SinkHandle,
    worker_pool::WorkerPool,
};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Capability invoked with `(logger_name, error_description)` when a sink
/// fails during write or flush.
pub type ErrorHandler = Arc<dyn Fn(&str, &str) + Send + Sync>;

pub struct Logger {
    name: String,
    sinks: Vec<SinkHandle>,
    level: AtomicLevel,
    flush_level: AtomicLevel,
    err_handler: RwLock<Option<ErrorHandler>>,
    pool: Option<Arc<WorkerPool>>,
    /// Queued messages carry a strong handle to their target logger, so a
    /// record outlives the caller's last reference until a worker writes it.
    weak_self: Weak<Logger>,
}

impl Logger {
    /// Create a synchronous logger writing `sinks` inline.
    pub fn new(name: impl Into<String>, sinks: Vec<SinkHandle>) -> Arc<Self> {
        Self::with_pool(name, sinks, None)
    }

    pub(crate) fn with_pool(
        name: impl Into<String>,
        sinks: Vec<SinkHandle>,
        pool: Option<Arc<WorkerPool>>,
    ) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|weak_self| Self {
            name,
            sinks,
            level: AtomicLevel::new(LogLevel::Info),
            flush_level: AtomicLevel::new(LogLevel::Off),
            err_handler: RwLock::new(None),
            pool,
            weak_self: weak_self.clone(),
        })
    }

    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// Name is the logger's stable registry key; it never changes after
    /// construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached sinks, in attachment order.
    pub fn sinks(&self) -> &[SinkHandle] {
        &self.sinks
    }

    pub fn is_async(&self) -> bool {
        self.pool.is_some()
    }

    pub fn level(&self) -> LogLevel {
        self.level.load()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level);
    }

    pub fn flush_level(&self) -> LogLevel {
        self.flush_level.load()
    }

    /// Records at or above `level` flush the written sinks immediately.
    pub fn set_flush_level(&self, level: LogLevel) {
        self.flush_level.store(level);
    }

    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level.load()
    }

    pub fn set_error_handler(&self, handler: ErrorHandler) {
        *self.err_handler.write() = Some(handler);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.should_log(level) {
            return;
        }
        let record = LogRecord::new(&self.name, level, message.into());
        match &self.pool {
            Some(pool) => {
                if let Some(me) = self.weak_self.upgrade() {
                    pool.post_record(me, record);
                }
            }
            None => self.write_record(&record),
        }
    }

    /// Flush every attached sink.
    ///
    /// On an asynchronous logger this enqueues a flush request and waits for a
    /// worker to complete it; the wait is unbounded. Use [`Logger::flush_timeout`]
    /// to bound it. Sink failures are routed to the error handler, not returned.
    pub fn flush(&self) -> Result<()> {
        self.flush_with(None)
    }

    /// Bounded variant of [`Logger::flush`]: fails with
    /// [`LoggerError::FlushTimeout`] if a hung sink keeps the worker busy past
    /// `timeout`.
    pub fn flush_timeout(&self, timeout: Duration) -> Result<()> {
        self.flush_with(Some(timeout))
    }

    fn flush_with(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.pool {
            Some(pool) => {
                let me = self.weak_self.upgrade().ok_or(LoggerError::FlushDropped)?;
                pool.flush_and_wait(me, timeout)
            }
            None => {
                self.flush_sinks();
                Ok(())
            }
        }
    }

    /// Synchronous sink-write path, shared by inline logging and the worker
    /// pool: iterate sinks in attachment order, skip sinks whose own level
    /// filters the record, write, and flush each written sink when the record
    /// reaches the flush-on level. A sink failure is reported through the
    /// error handler and never stops the iteration.
    pub(crate) fn write_record(&self, record: &LogRecord) {
        let flush_now = record.level >= self.flush_level.load();
        for sink in &self.sinks {
            if !sink.should_log(record.level) {
                continue;
            }
            if let Err(e) = sink.write(record) {
                self.handle_error(&e);
                continue;
            }
            if flush_now {
                if let Err(e) = sink.flush() {
                    self.handle_error(&e);
                }
            }
        }
    }

    pub(crate) fn flush_sinks(&self) {
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                self.handle_error(&e);
            }
        }
    }

    fn handle_error(&self, err: &LoggerError) {
        let handler = self.err_handler.read();
        match handler.as_ref() {
            Some(handler) => handler(&self.name, &err.to_string()),
            None => eprintln!("[LOGGER ERROR] [{}] {}", self.name, err),
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level.load())
            .field("flush_level", &self.flush_level.load())
            .field("sinks", &self.sinks.len())
            .field("is_async", &self.is_async())
            .finish()
    }
}

/// Builder for constructing a synchronous logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_registry::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder("app")
///     .level(LogLevel::Debug)
///     .flush_on(LogLevel::Error)
///     .sink(Arc::new(NullSink::new()))
///     .build();
/// ```
pub struct LoggerBuilder {
    name: String,
    sinks: Vec<SinkHandle>,
    level: LogLevel,
    flush_level: LogLevel,
    error_handler: Option<ErrorHandler>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: Vec::new(),
            level: LogLevel::Info,
            flush_level: LogLevel::Off,
            error_handler: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: SinkHandle) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sinks(mut self, sinks: impl IntoIterator<Item = SinkHandle>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flush_on(mut self, level: LogLevel) -> Self {
        self.flush_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }

    pub fn build(self) -> Arc<Logger> {
        let logger = Logger::new(self.name, self.sinks);
        logger.set_level(self.level);
        logger.set_flush_level(self.flush_level);
        if let Some(handler) = self.error_handler {
            logger.set_error_handler(handler);
        }
        logger
    }
}
