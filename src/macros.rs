//! Logging macros for ergonomic log message formatting.
//!
//! The macros capture `file!()` and `line!()` of the call site and only
//! format their arguments when the logger's level lets the event through.
//! They accept a `Logger`, a `&Logger` or an `Arc<Logger>`.
//!
//! # Examples
//!
//! ```
//! use sylar_log::prelude::*;
//! use sylar_log::info;
//!
//! let logger = LoggerManager::global().get_logger("docs");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use sylar_log::prelude::*;
/// # let logger = Logger::new("docs");
/// use sylar_log::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.is_enabled(level) {
            let event = $crate::LogEvent::new(level, file!(), line!())
                .with_message(format_args!($($arg)+));
            logger.log(level, &event);
        }
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use sylar_log::prelude::*;
/// # let logger = Logger::new("docs");
/// use sylar_log::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use sylar_log::prelude::*;
/// # let logger = Logger::new("docs");
/// use sylar_log::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use std::sync::Arc;

    #[test]
    fn test_log_macro() {
        let logger = Logger::new("macros");
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_level_macros() {
        let logger = Logger::new("macros");
        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
        assert_eq!(logger.metrics().total_logged(), 5);
    }

    #[test]
    fn test_disabled_level_skips_dispatch() {
        let logger = Logger::new("macros");
        logger.set_level(LogLevel::Error);
        info!(logger, "not formatted");
        error!(logger, "dispatched");
        assert_eq!(logger.metrics().total_logged(), 1);
    }

    #[test]
    fn test_accepts_shared_logger() {
        let logger = Arc::new(Logger::new("shared"));
        warn!(logger, "through Arc");
        warn!(&*logger, "through reference");
        assert_eq!(logger.metrics().total_logged(), 2);
    }
}
