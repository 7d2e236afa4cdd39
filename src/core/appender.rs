//! Appender trait for log output destinations

use super::{
    error::Result, log_event::LogEvent, log_format::LogFormat, log_level::LogLevel,
    logger::Logger,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared appender handle as stored by loggers
pub type AppenderRef = Arc<dyn LogAppender>;

#[derive(Debug, Default)]
struct FormatterSlot {
    formatter: Option<Arc<LogFormat>>,
    /// Set explicitly on the appender, as opposed to copied from a logger
    own: bool,
}

/// Level gate and formatter override common to every appender
#[derive(Debug, Default)]
pub struct AppenderCore {
    level: RwLock<LogLevel>,
    formatter: RwLock<FormatterSlot>,
}

impl AppenderCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn formatter(&self) -> Option<Arc<LogFormat>> {
        self.formatter.read().formatter.clone()
    }

    /// Install an explicit formatter; `None` drops it, so the logger's
    /// default applies again
    pub fn set_formatter(&self, formatter: Option<Arc<LogFormat>>) {
        let mut slot = self.formatter.write();
        slot.own = formatter.is_some();
        slot.formatter = formatter;
    }

    /// Whether the current formatter was set on the appender itself
    pub fn has_own_formatter(&self) -> bool {
        self.formatter.read().own
    }

    /// Take a logger's default unless an explicit formatter is set.
    ///
    /// Returns whether the formatter was replaced.
    pub fn inherit_formatter(&self, formatter: Arc<LogFormat>) -> bool {
        let mut slot = self.formatter.write();
        if slot.own {
            return false;
        }
        slot.formatter = Some(formatter);
        true
    }

    /// Whether an event at `level` passes this appender's threshold
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// The appender's own formatter, else the dispatching logger's
    pub fn resolve_formatter(&self, logger: &Logger) -> Arc<LogFormat> {
        self.formatter().unwrap_or_else(|| logger.formatter())
    }
}

pub trait LogAppender: Send + Sync {
    /// Render and write one event. Events below the appender's own level are
    /// skipped with `Ok(())`.
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    fn core(&self) -> &AppenderCore;

    fn level(&self) -> LogLevel {
        self.core().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.core().set_level(level);
    }

    fn formatter(&self) -> Option<Arc<LogFormat>> {
        self.core().formatter()
    }

    fn set_formatter(&self, formatter: Option<Arc<LogFormat>>) {
        self.core().set_formatter(formatter);
    }
}
