//! Core registry and dispatch types

pub mod error;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod record;
pub mod registry;
pub mod scope_tag;
pub mod sink;
pub mod worker_pool;

pub use error::{LoggerError, Result};
pub use formatter::{Formatter, FullFormatter, JsonFormatter, TimestampFormat};
pub use log_level::{AtomicLevel, LogLevel};
pub use logger::{ErrorHandler, Logger, LoggerBuilder};
pub use metrics::QueueMetrics;
pub use queue::{DispatchQueue, OverflowPolicy, QueueMessage};
pub use record::LogRecord;
pub use registry::Registry;
pub use scope_tag::ScopedTag;
pub use sink::{Sink, SinkHandle};
pub use worker_pool::{WorkerPool, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT};
