//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod log_event;
pub mod log_format;
pub mod log_level;
pub mod logger;
pub mod manager;
pub mod metrics;

pub use appender::{AppenderCore, AppenderRef, LogAppender};
pub use error::{LoggerError, Result};
pub use log_event::LogEvent;
pub use log_format::{FormatItem, LogFormat, DEFAULT_DATE_FORMAT};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, ROOT_LOGGER_NAME};
pub use manager::LoggerManager;
pub use metrics::LoggerMetrics;
