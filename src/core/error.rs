//! Error types for the registry and dispatch core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A factory create() hit a name already present in the registry
    #[error("logger '{0}' is already registered")]
    DuplicateLogger(String),

    /// Sink IO error with context
    #[error("sink error while {operation} '{target}': {source}")]
    SinkIo {
        operation: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Blocking flush did not complete in time
    #[error("flush did not complete within {0:?}")]
    FlushTimeout(std::time::Duration),

    /// Flush request was evicted by the overflow policy or lost to teardown
    #[error("flush request was dropped before completion")]
    FlushDropped,

    /// Worker pool no longer accepts messages
    #[error("worker pool already stopped")]
    PoolStopped,

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink IO error with context
    pub fn sink_io(
        operation: impl Into<String>,
        target: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::SinkIo {
            operation: operation.into(),
            target: target.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::DuplicateLogger("net".to_string());
        assert!(matches!(err, LoggerError::DuplicateLogger(_)));

        let err = LoggerError::config("DispatchQueue", "capacity must be non-zero");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::DuplicateLogger("net".to_string());
        assert_eq!(err.to_string(), "logger 'net' is already registered");

        let err = LoggerError::FlushTimeout(std::time::Duration::from_millis(50));
        assert_eq!(err.to_string(), "flush did not complete within 50ms");

        let err = LoggerError::config("WorkerPool", "zero workers");
        assert_eq!(
            err.to_string(),
            "invalid configuration for WorkerPool: zero workers"
        );
    }

    #[test]
    fn test_sink_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::sink_io("writing", "/var/log/app.log", io_err);

        assert!(matches!(err, LoggerError::SinkIo { .. }));
        assert!(err.to_string().contains("writing"));
        assert!(err.to_string().contains("/var/log/app.log"));
    }
}
