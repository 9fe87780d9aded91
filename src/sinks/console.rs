//! Console sink implementation

use crate::core::{AtomicLevel, Formatter, FullFormatter, LogLevel, LogRecord, Result, Sink};
use colored::Colorize;

pub struct ConsoleSink {
    level: AtomicLevel,
    formatter: Box<dyn Formatter>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            level: AtomicLevel::new(LogLevel::Trace),
            formatter: Box::new(FullFormatter::new()),
            use_colors: true,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Replace the formatter rendering records for this sink
    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        let mut line = String::new();
        self.formatter.format(record, &mut line)?;

        let line = if self.use_colors {
            line.color(record.level.color_code()).to_string()
        } else {
            line
        };

        // Route Error and Fatal levels to stderr, others to stdout
        match record.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level);
    }

    fn level(&self) -> LogLevel {
        self.level.load()
    }

    fn name(&self) -> &str {
        "console"
    }
}
