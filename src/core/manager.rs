//! Registry of named loggers
//!
//! Every manager owns a `root` logger writing to stdout. Loggers created
//! through [`LoggerManager::get_logger`] start without appenders and forward
//! to root until they are given their own.

use super::logger::{Logger, ROOT_LOGGER_NAME};
use crate::appenders::StdoutLogAppender;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub struct LoggerManager {
    root: Arc<Logger>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerManager {
    pub fn new() -> Self {
        let root = Arc::new(Logger::new(ROOT_LOGGER_NAME));
        root.add_appender(Arc::new(StdoutLogAppender::new()));

        let mut loggers = HashMap::new();
        loggers.insert(ROOT_LOGGER_NAME.to_string(), Arc::clone(&root));

        Self {
            root,
            loggers: Mutex::new(loggers),
        }
    }

    /// Process-wide manager, created on first use
    ///
    /// ```
    /// use sylar_log::LoggerManager;
    ///
    /// let system = LoggerManager::global().get_logger("system");
    /// assert_eq!(system.name(), "system");
    /// ```
    pub fn global() -> &'static LoggerManager {
        static GLOBAL: OnceLock<LoggerManager> = OnceLock::new();
        GLOBAL.get_or_init(LoggerManager::new)
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Existing logger called `name`, or a new one falling back to root
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.lock();
        let logger = loggers.entry(name.to_string()).or_insert_with(|| {
            Arc::new(Logger::with_fallback(name, Arc::clone(&self.root)))
        });
        Arc::clone(logger)
    }

    /// Register a preconfigured logger, replacing any logger of that name.
    ///
    /// `root` cannot be replaced; configure it through [`LoggerManager::root`].
    pub fn insert(&self, logger: Arc<Logger>) -> Option<Arc<Logger>> {
        if logger.name() == ROOT_LOGGER_NAME {
            eprintln!("[LOGGER WARNING] Ignoring attempt to replace the root logger");
            return None;
        }
        self.loggers.lock().insert(logger.name().to_string(), logger)
    }

    /// Registered logger names, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LoggerManager {
    fn default() -> Self {
        Self::new()
    }
}
