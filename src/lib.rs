//! # Sylar Log
//!
//! A small pattern-based logging library.
//!
//! Named [`Logger`]s gate events by [`LogLevel`] and fan them out to a chain
//! of appenders ([`StdoutLogAppender`], [`FileLogAppender`]). Every appender
//! renders through a [`LogFormat`], compiled once from a pattern such as
//! `"%d [%p] %f:%l %m%n"`.
//!
//! ```
//! use sylar_log::prelude::*;
//! use sylar_log::info;
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .pattern("%d{%H:%M:%S} [%p] %c %f:%l %m%n")
//!     .appender(StdoutLogAppender::new())
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "listening on port {}", 8080);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{FileLogAppender, FileMode, StdoutLogAppender};
    pub use crate::core::{
        AppenderCore, AppenderRef, FormatItem, LogAppender, LogEvent, LogFormat, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerManager, LoggerMetrics, Result,
    };
}

pub use appenders::{FileLogAppender, FileMode, StdoutLogAppender};
pub use core::{
    AppenderCore, AppenderRef, FormatItem, LogAppender, LogEvent, LogFormat, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerManager, LoggerMetrics, Result, DEFAULT_DATE_FORMAT,
    ROOT_LOGGER_NAME,
};
