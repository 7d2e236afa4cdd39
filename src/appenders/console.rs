//! Standard output appender

use crate::core::{AppenderCore, LogAppender, LogEvent, LogFormat, LogLevel, Logger, Result};
use std::io::Write;
use std::sync::Arc;

#[cfg(feature = "console")]
use colored::Colorize;

pub struct StdoutLogAppender {
    core: AppenderCore,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl StdoutLogAppender {
    pub fn new() -> Self {
        Self {
            core: AppenderCore::new(),
            use_colors: false,
        }
    }

    /// Colour each rendered line by level
    ///
    /// # Example
    ///
    /// ```
    /// use sylar_log::appenders::StdoutLogAppender;
    ///
    /// let appender = StdoutLogAppender::new().with_colors(true);
    /// ```
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.core.set_level(level);
        self
    }

    #[must_use]
    pub fn with_formatter(self, formatter: Arc<LogFormat>) -> Self {
        self.core.set_formatter(Some(formatter));
        self
    }

    #[cfg(feature = "console")]
    fn paint(&self, level: LogLevel, text: String) -> String {
        if !self.use_colors {
            return text;
        }
        // keep the trailing newline outside the escape sequence
        match text.strip_suffix('\n') {
            Some(body) => format!("{}\n", body.color(level.color_code())),
            None => text.color(level.color_code()).to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _level: LogLevel, text: String) -> String {
        text
    }
}

impl Default for StdoutLogAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAppender for StdoutLogAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
        if !self.core.accepts(level) {
            return Ok(());
        }

        let formatter = self.core.resolve_formatter(logger);
        let output = self.paint(level, formatter.format(logger, level, event));

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }

    fn core(&self) -> &AppenderCore {
        &self.core
    }
}
