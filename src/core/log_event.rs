//! Log event structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<u64>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Pin the reference point for [`elapsed_ms`] if nothing has yet.
///
/// Called by every [`Logger`](super::logger::Logger) constructor, so `%r`
/// counts from the first logger rather than from the first event.
pub fn start_clock() {
    PROCESS_START.get_or_init(Instant::now);
}

/// Milliseconds since logging started in this process
pub fn elapsed_ms() -> u64 {
    let start = PROCESS_START.get_or_init(Instant::now);
    start.elapsed().as_millis() as u64
}

/// Small sequential id for the calling thread, assigned on first use
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        *cache
            .borrow_mut()
            .get_or_insert_with(|| NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed))
    })
}

/// Name of the calling thread, or `"unnamed"`
pub fn current_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                std::thread::current()
                    .name()
                    .unwrap_or("unnamed")
                    .to_string()
            })
            .clone()
    })
}

/// Everything known about one log call.
///
/// All fields are fixed at construction except the message buffer, which can
/// be appended to with [`LogEvent::format`], [`LogEvent::content_mut`] or
/// `write!` through the [`fmt::Write`] impl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    level: LogLevel,
    file: String,
    line: u32,
    elapse: u64,
    thread_id: u64,
    fiber_id: u64,
    time: DateTime<Local>,
    thread_name: String,
    /// Logger the event was first dispatched to, set on fallback forwarding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logger_name: Option<String>,
    content: String,
}

impl LogEvent {
    /// Capture the current time, thread and elapsed-ms for a call site
    pub fn new(level: LogLevel, file: impl Into<String>, line: u32) -> Self {
        Self {
            level,
            file: file.into(),
            line,
            elapse: elapsed_ms(),
            thread_id: current_thread_id(),
            fiber_id: 0,
            time: Local::now(),
            thread_name: current_thread_name(),
            logger_name: None,
            content: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl fmt::Display) -> Self {
        use fmt::Write;
        // Writing into a String cannot fail
        let _ = write!(self.content, "{}", message);
        self
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    pub fn with_elapse(mut self, elapse: u64) -> Self {
        self.elapse = elapse;
        self
    }

    pub fn with_thread(mut self, thread_id: u64, thread_name: impl Into<String>) -> Self {
        self.thread_id = thread_id;
        self.thread_name = thread_name.into();
        self
    }

    pub fn with_fiber_id(mut self, fiber_id: u64) -> Self {
        self.fiber_id = fiber_id;
        self
    }

    /// Attribute the event to `name`, whichever logger ends up writing it
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn elapse(&self) -> u64 {
        self.elapse
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn fiber_id(&self) -> u64 {
        self.fiber_id
    }

    pub fn time(&self) -> &DateTime<Local> {
        &self.time
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn logger_name(&self) -> Option<&str> {
        self.logger_name.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    /// Append formatted text to the message buffer
    ///
    /// ```
    /// use sylar_log::{LogEvent, LogLevel};
    ///
    /// let mut event = LogEvent::new(LogLevel::Info, file!(), line!());
    /// event.format(format_args!("listening on port {}", 8080));
    /// assert_eq!(event.content(), "listening on port 8080");
    /// ```
    pub fn format(&mut self, args: fmt::Arguments<'_>) {
        use fmt::Write;
        let _ = self.content.write_fmt(args);
    }
}

impl fmt::Write for LogEvent {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.content.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fmt::Write;

    #[test]
    fn test_new_captures_context() {
        let event = LogEvent::new(LogLevel::Warn, "src/main.rs", 42);
        assert_eq!(event.level(), LogLevel::Warn);
        assert_eq!(event.file(), "src/main.rs");
        assert_eq!(event.line(), 42);
        assert_eq!(event.fiber_id(), 0);
        assert_eq!(event.thread_id(), current_thread_id());
        assert!(event.content().is_empty());
    }

    #[test]
    fn test_message_buffer_is_appendable() {
        let mut event = LogEvent::new(LogLevel::Info, "a.rs", 1).with_message("hello");
        write!(event, ", {}", "world").unwrap();
        event.format(format_args!(" #{}", 7));
        event.content_mut().push('!');
        assert_eq!(event.content(), "hello, world #7!");
    }

    #[test]
    fn test_thread_ids_differ_between_threads() {
        let here = current_thread_id();
        let there = std::thread::spawn(current_thread_id).join().unwrap();
        assert_ne!(here, there);
        assert_eq!(here, current_thread_id());
    }

    #[test]
    fn test_thread_name_of_named_thread() {
        let name = std::thread::Builder::new()
            .name("worker-7".to_string())
            .spawn(current_thread_name)
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(name, "worker-7");
    }

    #[test]
    fn test_explicit_context() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).single().unwrap();
        let event = LogEvent::new(LogLevel::Debug, "x.rs", 3)
            .with_time(time)
            .with_elapse(1500)
            .with_thread(9, "io")
            .with_fiber_id(4);
        assert_eq!(*event.time(), time);
        assert_eq!(event.elapse(), 1500);
        assert_eq!(event.thread_id(), 9);
        assert_eq!(event.thread_name(), "io");
        assert_eq!(event.fiber_id(), 4);
        assert_eq!(event.logger_name(), None);
    }

    #[test]
    fn test_logger_name_attribution() {
        let event = LogEvent::new(LogLevel::Info, "x.rs", 1).with_logger_name("payments");
        assert_eq!(event.logger_name(), Some("payments"));

        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["logger_name"], "payments");
    }

    #[test]
    fn test_clock_runs_from_start() {
        start_clock();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let event = LogEvent::new(LogLevel::Info, "x.rs", 1);
        assert!(event.elapse() >= 20);
    }

    #[test]
    fn test_serializes_fields() {
        let event = LogEvent::new(LogLevel::Error, "db.rs", 12).with_message("timeout");
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["level"], "Error");
        assert_eq!(value["file"], "db.rs");
        assert_eq!(value["line"], 12);
        assert_eq!(value["content"], "timeout");
        assert!(value.get("logger_name").is_none());
    }
}
