//! # Rust Log Registry
//!
//! The concurrency and lifecycle core of a high-performance logging library:
//! a process-wide registry of named loggers with a default-logger indirection,
//! and a bounded asynchronous dispatch pipeline decoupling application threads
//! from slow sinks.
//!
//! ## Features
//!
//! - **Named logger directory**: create, look up, and drop loggers by name
//! - **Asynchronous dispatch**: bounded queue + worker pool with configurable
//!   overflow policies (`Block`, `OverflowOldest`, `DiscardNew`)
//! - **Thread safe**: unsynchronized concurrent access from arbitrary threads
//! - **Deterministic teardown**: accepted records are drained before shutdown
//!   returns
//!
//! ## Quick start
//!
//! ```
//! use rust_log_registry::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! let logger = registry
//!     .create("app", vec![Arc::new(NullSink::new())])
//!     .expect("name is free");
//! logger.info("started");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        DispatchQueue, ErrorHandler, Formatter, FullFormatter, JsonFormatter, LogLevel, LogRecord,
        Logger, LoggerBuilder, LoggerError, OverflowPolicy, QueueMetrics, Registry, Result,
        ScopedTag, Sink, SinkHandle, TimestampFormat, WorkerPool,
    };
    pub use crate::sinks::NullSink;

    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;

    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

pub use crate::core::{
    AtomicLevel, DispatchQueue, ErrorHandler, Formatter, FullFormatter, JsonFormatter, LogLevel,
    LogRecord, Logger, LoggerBuilder, LoggerError, OverflowPolicy, QueueMessage, QueueMetrics,
    Registry, Result, ScopedTag, Sink, SinkHandle, TimestampFormat, WorkerPool,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT,
};
pub use crate::sinks::NullSink;

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;

#[cfg(feature = "file")]
pub use crate::sinks::FileSink;

use std::sync::Arc;
use std::time::Duration;

// Free-function surface over the process-wide registry. Each call delegates
// to `Registry::global()`; tests that need isolation construct their own
// `Registry` instead.

/// Create a synchronous logger through the global registry's factory path.
pub fn create(name: impl Into<String>, sinks: Vec<SinkHandle>) -> Result<Arc<Logger>> {
    Registry::global().create(name, sinks)
}

/// Create an asynchronous logger backed by the global registry's worker pool.
pub fn create_async(name: impl Into<String>, sinks: Vec<SinkHandle>) -> Result<Arc<Logger>> {
    Registry::global().create_async(name, sinks)
}

/// Insert a logger into the global registry, replacing any prior entry with
/// the same name.
pub fn register_logger(logger: Arc<Logger>) {
    Registry::global().register_logger(logger);
}

/// Look up a logger by name in the global registry.
pub fn get(name: &str) -> Option<Arc<Logger>> {
    Registry::global().get(name)
}

/// Remove one logger from the global registry; clears the default-logger slot
/// if it held the same name.
pub fn drop(name: &str) {
    Registry::global().drop(name);
}

/// Empty the global registry and clear its default-logger slot.
pub fn drop_all() {
    Registry::global().drop_all();
}

/// Visit every logger registered in the global registry at call time.
pub fn apply_all<F: FnMut(&Arc<Logger>)>(visitor: F) {
    Registry::global().apply_all(visitor);
}

/// The global registry's default logger, used by the ambient logging calls
/// below and by the literal-first macro forms.
pub fn default_logger() -> Option<Arc<Logger>> {
    Registry::global().default_logger()
}

/// Replace the global default logger; `None` clears it.
pub fn set_default_logger(logger: Option<Arc<Logger>>) {
    Registry::global().set_default_logger(logger);
}

/// Set the global level and propagate it to every registered logger.
pub fn set_level(level: LogLevel) {
    Registry::global().set_level(level);
}

/// Set the global flush-on level and propagate it to every registered logger.
pub fn set_flush_level(level: LogLevel) {
    Registry::global().set_flush_level(level);
}

/// Toggle automatic registration for the global factory path.
pub fn set_automatic_registration(enabled: bool) {
    Registry::global().set_automatic_registration(enabled);
}

/// Replace the global registry's shared worker pool. Call before creating
/// asynchronous loggers.
pub fn init_worker_pool(
    queue_capacity: usize,
    policy: OverflowPolicy,
    worker_count: usize,
) -> Arc<WorkerPool> {
    Registry::global().init_worker_pool(queue_capacity, policy, worker_count)
}

/// Tear down the global registry: drop every logger and drain the worker pool.
pub fn shutdown() {
    Registry::global().shutdown();
}

/// Log through the default logger; a no-op while none is set.
pub fn log(level: LogLevel, message: impl Into<String>) {
    if let Some(logger) = default_logger() {
        logger.log(level, message);
    }
}

/// Flush the default logger's sinks, waiting for completion on an
/// asynchronous logger.
pub fn flush() -> Result<()> {
    match default_logger() {
        Some(logger) => logger.flush(),
        None => Ok(()),
    }
}

/// Bounded variant of [`flush`].
pub fn flush_timeout(timeout: Duration) -> Result<()> {
    match default_logger() {
        Some(logger) => logger.flush_timeout(timeout),
        None => Ok(()),
    }
}

pub fn trace(message: impl Into<String>) {
    log(LogLevel::Trace, message);
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message);
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

pub fn fatal(message: impl Into<String>) {
    log(LogLevel::Fatal, message);
}
