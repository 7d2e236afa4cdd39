//! Appender implementations

pub mod console;
pub mod file;

pub use console::StdoutLogAppender;
pub use file::{FileLogAppender, FileMode};

// Re-export the trait so appenders can be implemented from this module alone
pub use crate::core::{AppenderCore, LogAppender};
