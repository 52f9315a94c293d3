//! Error types for the logging facility

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// Value that does not name a known enum variant
    #[error("Invalid {kind}: '{value}'")]
    Parse { kind: &'static str, value: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
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

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        LoggerError::Parse {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("InitOptions", "empty file name format");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_appender("logs/latest.txt", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::parse("log level", "LOUD");
        assert!(matches!(err, LoggerError::Parse { kind: "log level", .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("TimestampFormat", "bad specifier");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for TimestampFormat: bad specifier"
        );

        let err = LoggerError::parse("detail level", "verbose");
        assert_eq!(err.to_string(), "Invalid detail level: 'verbose'");
    }

    #[test]
    fn test_io_operation_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("list log folder", "Failed to read 'logs'", io_err);

        assert_eq!(err.source().map(|s| s.to_string()), Some("access denied".into()));
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("create log directory", "cannot create 'logs'", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("create log directory"));
        assert!(err.to_string().contains("cannot create 'logs'"));
    }
}
