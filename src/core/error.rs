//! Error types for the logger system

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

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// Pattern compilation error
    #[error("Formatter error ({pattern}): {message}")]
    FormatterError { pattern: String, message: String },
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

    /// Create a formatter error for the given pattern
    pub fn formatter(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerBuilder", "empty name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_appender("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::formatter("%q", "unknown directive");
        assert!(matches!(err, LoggerError::FormatterError { .. }));

        let err: LoggerError = std::io::Error::other("stream closed").into();
        assert!(matches!(err, LoggerError::IoError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_appender("/var/log/app.log", "file is not open");
        assert_eq!(
            err.to_string(),
            "File appender error for '/var/log/app.log': file is not open"
        );

        let err = LoggerError::formatter("%q", "unknown directive '%q'");
        assert_eq!(
            err.to_string(),
            "Formatter error (%q): unknown directive '%q'"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open app.log", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("cannot open app.log"));
    }
}
