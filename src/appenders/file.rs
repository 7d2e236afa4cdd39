//! File appender implementation

use crate::core::{
    AppenderCore, LogAppender, LogEvent, LogFormat, LogLevel, Logger, LoggerError, Result,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How [`FileLogAppender::reopen`] opens the backing file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileMode {
    /// Keep existing content and write at the end
    #[default]
    Append,
    /// Discard existing content on every reopen
    Truncate,
}

/// Appender writing rendered events to a file.
///
/// Nothing is opened by [`FileLogAppender::new`]; call
/// [`FileLogAppender::reopen`] before first use and again whenever the file
/// may have been moved away (e.g. by an external rotation tool). Writes are
/// buffered until [`LogAppender::flush`], a reopen, or drop.
pub struct FileLogAppender {
    core: AppenderCore,
    path: PathBuf,
    mode: FileMode,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileLogAppender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            core: AppenderCore::new(),
            path: path.into(),
            mode: FileMode::default(),
            writer: Mutex::new(None),
        }
    }

    /// Create the appender and open its file right away
    ///
    /// ```no_run
    /// use sylar_log::appenders::FileLogAppender;
    ///
    /// let appender = FileLogAppender::open("/var/log/app.log").unwrap();
    /// assert!(appender.is_open());
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let appender = Self::new(path);
        appender.try_reopen()?;
        Ok(appender)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Close any open stream and open the path again; `true` on success
    pub fn reopen(&self) -> bool {
        self.try_reopen().is_ok()
    }

    /// Like [`FileLogAppender::reopen`] but keeps the failure reason
    pub fn try_reopen(&self) -> Result<()> {
        let mut writer = self.writer.lock();

        if let Some(mut old) = writer.take() {
            // The old stream is closed either way
            if let Err(e) = old.flush() {
                println!(
                    "[LOGGER WARNING] Failed to flush '{}' before reopen: {}",
                    self.path.display(),
                    e
                );
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match self.mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate => options.write(true).truncate(true),
        };

        let file = options.open(&self.path).map_err(|e| {
            LoggerError::file_appender(self.path.display().to_string(), e.to_string())
        })?;
        *writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl LogAppender for FileLogAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
        if !self.core.accepts(level) {
            return Ok(());
        }

        let mut writer = self.writer.lock();
        let writer = writer.as_mut().ok_or_else(|| {
            LoggerError::file_appender(self.path.display().to_string(), "file is not open")
        })?;

        let formatter = self.core.resolve_formatter(logger);
        formatter
            .write_to(writer, logger, level, event)
            .map_err(|e| {
                LoggerError::io_operation("writing log file", self.path.display().to_string(), e)
            })
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn core(&self) -> &AppenderCore {
        &self.core
    }
}

impl Drop for FileLogAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = LogAppender::flush(&*self);
    }
}
