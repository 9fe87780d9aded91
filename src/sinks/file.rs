//! File sink implementation

use crate::core::{
    AtomicLevel, Formatter, FullFormatter, LogLevel, LogRecord, LoggerError, Result, Sink,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Append-mode buffered file sink.
///
/// The writer sits behind a lock so the sink can be attached to several
/// loggers and driven by several workers at once.
pub struct FileSink {
    level: AtomicLevel,
    formatter: Box<dyn Formatter>,
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            level: AtomicLevel::new(LogLevel::Trace),
            formatter: Box::new(FullFormatter::new()),
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Replace the formatter rendering records for this sink
    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        let mut line = String::new();
        self.formatter.format(record, &mut line)?;
        line.push('\n');

        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::sink_io("writing", self.path.display().to_string(), e))?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| LoggerError::sink_io("flushing", self.path.display().to_string(), e))?;
        Ok(())
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level);
    }

    fn level(&self) -> LogLevel {
        self.level.load()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
