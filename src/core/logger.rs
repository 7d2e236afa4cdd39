//! Main logger implementation

use super::{
    appender::{AppenderRef, LogAppender},
    error::{LoggerError, Result},
    log_event::{self, LogEvent},
    log_format::LogFormat,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Name used when none is given
pub const ROOT_LOGGER_NAME: &str = "root";

pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    appenders: RwLock<Vec<AppenderRef>>,
    formatter: RwLock<Arc<LogFormat>>,
    /// Receives events while this logger has no appenders of its own
    fallback: Option<Arc<Logger>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        log_event::start_clock();
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Vec::new()),
            formatter: RwLock::new(Arc::new(LogFormat::default())),
            fallback: None,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a logger that forwards to `fallback` until it gets appenders
    #[must_use]
    pub fn with_fallback(name: impl Into<String>, fallback: Arc<Logger>) -> Self {
        Self {
            fallback: Some(fallback),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn formatter(&self) -> Arc<LogFormat> {
        self.formatter.read().clone()
    }

    /// Replace the default formatter.
    ///
    /// Attached appenders that inherited the previous default switch to the
    /// new one; appenders with a formatter of their own keep it.
    pub fn set_formatter(&self, formatter: Arc<LogFormat>) {
        *self.formatter.write() = Arc::clone(&formatter);
        for appender in self.appenders.read().iter() {
            appender.core().inherit_formatter(Arc::clone(&formatter));
        }
    }

    /// Compile and install a default pattern, keeping the current one on error
    pub fn set_formatter_pattern(&self, pattern: &str) -> Result<()> {
        let formatter = LogFormat::parse(pattern)?;
        self.set_formatter(Arc::new(formatter));
        Ok(())
    }

    pub fn fallback(&self) -> Option<&Arc<Logger>> {
        self.fallback.as_ref()
    }

    /// Append an appender, sharing this logger's formatter with it unless
    /// it was given one of its own
    pub fn add_appender(&self, appender: AppenderRef) {
        appender.core().inherit_formatter(self.formatter());
        self.appenders.write().push(appender);
    }

    /// Remove the first occurrence of this exact handle
    pub fn del_appender(&self, appender: &AppenderRef) -> bool {
        let mut appenders = self.appenders.write();
        match appenders.iter().position(|a| Arc::ptr_eq(a, appender)) {
            Some(idx) => {
                appenders.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Snapshot of the current appender list, in insertion order
    pub fn appenders(&self) -> Vec<AppenderRef> {
        self.appenders.read().clone()
    }

    /// Dispatch `event` to every appender if `level` passes the threshold.
    ///
    /// Appender failures are reported on stdout and counted in
    /// [`Logger::metrics`]; they never reach the caller and never stop the
    /// remaining appenders.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        // Snapshot so appenders may call back into this logger
        let appenders = self.appenders();
        if appenders.is_empty() {
            if let Some(ref fallback) = self.fallback {
                // Keep this logger's name on the event for `%c`
                if event.logger_name().is_some() {
                    fallback.log(level, event);
                } else {
                    fallback.log(level, &event.clone().with_logger_name(self.name.as_str()));
                }
                return;
            }
        }

        self.metrics.record_logged();
        if self.dispatch(&appenders, level, event) {
            self.metrics.record_failed();
        }
    }

    /// Per-appender isolation: one failing or panicking appender does not
    /// keep the event from the others. Returns whether any appender failed.
    fn dispatch(&self, appenders: &[AppenderRef], level: LogLevel, event: &LogEvent) -> bool {
        let mut has_error = false;

        for appender in appenders {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(self, level, event)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    println!(
                        "[LOGGER ERROR] Appender '{}' of logger '{}' failed: {}",
                        appender.name(),
                        self.name,
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    println!(
                        "[LOGGER CRITICAL] Appender '{}' of logger '{}' panicked: {}",
                        appender.name(),
                        self.name,
                        panic_msg
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Flush every appender, or the fallback's while this logger has none.
    ///
    /// All appenders are flushed even if one fails; the first error is
    /// returned.
    pub fn flush(&self) -> Result<()> {
        let appenders = self.appenders();
        if appenders.is_empty() {
            if let Some(ref fallback) = self.fallback {
                return fallback.flush();
            }
        }

        let mut first_error = None;
        for appender in appenders {
            if let Err(e) = appender.flush() {
                println!(
                    "[LOGGER ERROR] Flushing appender '{}' of logger '{}' failed: {}",
                    appender.name(),
                    self.name,
                    e
                );
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use sylar_log::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("app")
    ///     .level(LogLevel::Info)
    ///     .pattern("%d [%p] %c: %m%n")
    ///     .appender(StdoutLogAppender::new())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.appender_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let appenders: Vec<String> = self
            .appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("pattern", &self.formatter().pattern())
            .field("appenders", &appenders)
            .field("fallback", &self.fallback.as_ref().map(|l| l.name().to_string()))
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    pattern: Option<String>,
    formatter: Option<Arc<LogFormat>>,
    appenders: Vec<AppenderRef>,
    fallback: Option<Arc<Logger>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: LogLevel::Debug,
            pattern: None,
            formatter: None,
            appenders: Vec::new(),
            fallback: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Default pattern, compiled and validated by [`LoggerBuilder::build`]
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.formatter = None;
        self
    }

    /// Use an already compiled formatter as the default
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<LogFormat>) -> Self {
        self.formatter = Some(formatter);
        self.pattern = None;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: LogAppender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an appender handle that is also held elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: AppenderRef) -> Self {
        self.appenders.push(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fallback(mut self, fallback: Arc<Logger>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("Logger", "logger name must not be empty"));
        }

        let mut logger = Logger::new(self.name);
        logger.fallback = self.fallback;
        logger.set_level(self.level);

        if let Some(pattern) = self.pattern {
            logger.set_formatter_pattern(&pattern)?;
        } else if let Some(formatter) = self.formatter {
            logger.set_formatter(formatter);
        }

        for appender in self.appenders {
            logger.add_appender(appender);
        }

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
