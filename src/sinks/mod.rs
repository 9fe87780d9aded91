//! Sink implementations

pub mod null;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "file")]
pub mod file;

pub use null::NullSink;

#[cfg(feature = "console")]
pub use console::ConsoleSink;

#[cfg(feature = "file")]
pub use file::FileSink;

// Re-export the trait for convenience
pub use crate::core::Sink;
