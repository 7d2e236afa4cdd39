//! Pattern-based formatter
//!
//! A [`LogFormat`] compiles a printf/log4j-style pattern into a list of
//! [`FormatItem`]s once, then renders every event by walking that list.
//!
//! | Directive | Renders                                   |
//! |-----------|-------------------------------------------|
//! | `%m`      | message                                   |
//! | `%p`      | level                                     |
//! | `%r`      | milliseconds since logging started        |
//! | `%c`      | logger name                               |
//! | `%t`      | thread id                                 |
//! | `%N`      | thread name                               |
//! | `%F`      | fiber id                                  |
//! | `%d{fmt}` | local time, strftime `fmt` (optional)     |
//! | `%f`      | file name                                 |
//! | `%l`      | line number                               |
//! | `%n`      | newline                                   |
//! | `%T`      | tab                                       |
//! | `%%`      | a literal `%`                             |
//!
//! Malformed patterns never fail construction. The offending directive is
//! replaced by an error marker such as `<<error_format %q>>` and
//! [`LogFormat::is_error`] reports `true`. Use [`LogFormat::parse`] to reject
//! such patterns instead.

use super::error::{LoggerError, Result};
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::Logger;
use chrono::format::{Item, StrftimeItems};
use std::fmt::{self, Write as _};
use std::io;

/// Default strftime format for `%d`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compiled renderer unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    Literal(String),
    Message,
    Level,
    Elapse,
    LoggerName,
    ThreadId,
    ThreadName,
    FiberId,
    DateTime(String),
    FileName,
    Line,
    NewLine,
    Tab,
    /// Marker left in place of a directive that failed to compile
    Error(String),
}

impl FormatItem {
    /// Map a directive character (and its optional `{arg}`) to a renderer.
    ///
    /// Returns the error marker text for unknown directives.
    fn from_directive(directive: char, arg: Option<&str>) -> std::result::Result<Self, String> {
        let item = match directive {
            'm' => FormatItem::Message,
            'p' => FormatItem::Level,
            'r' => FormatItem::Elapse,
            'c' => FormatItem::LoggerName,
            't' => FormatItem::ThreadId,
            'N' => FormatItem::ThreadName,
            'F' => FormatItem::FiberId,
            'f' => FormatItem::FileName,
            'l' => FormatItem::Line,
            'n' => FormatItem::NewLine,
            'T' => FormatItem::Tab,
            'd' => {
                let date_format = match arg {
                    Some(fmt) if !fmt.is_empty() => fmt,
                    _ => DEFAULT_DATE_FORMAT,
                };
                if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
                    return Err(format!("<<error_format %d{{{}}}>>", date_format));
                }
                FormatItem::DateTime(date_format.to_string())
            }
            other => return Err(format!("<<error_format %{}>>", other)),
        };
        Ok(item)
    }

    fn render<W: fmt::Write>(
        &self,
        out: &mut W,
        logger_name: &str,
        level: LogLevel,
        event: &LogEvent,
    ) -> fmt::Result {
        match self {
            FormatItem::Literal(text) => out.write_str(text),
            FormatItem::Message => out.write_str(event.content()),
            FormatItem::Level => out.write_str(level.to_str()),
            FormatItem::Elapse => write!(out, "{}", event.elapse()),
            FormatItem::LoggerName => out.write_str(event.logger_name().unwrap_or(logger_name)),
            FormatItem::ThreadId => write!(out, "{}", event.thread_id()),
            FormatItem::ThreadName => out.write_str(event.thread_name()),
            FormatItem::FiberId => write!(out, "{}", event.fiber_id()),
            FormatItem::DateTime(date_format) => write!(out, "{}", event.time().format(date_format)),
            FormatItem::FileName => out.write_str(event.file()),
            FormatItem::Line => write!(out, "{}", event.line()),
            FormatItem::NewLine => out.write_char('\n'),
            FormatItem::Tab => out.write_char('\t'),
            FormatItem::Error(marker) => out.write_str(marker),
        }
    }
}

/// Compiled log pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    pattern: String,
    items: Vec<FormatItem>,
    error: bool,
}

impl LogFormat {
    /// Pattern installed on loggers that were not given one
    pub const DEFAULT_PATTERN: &'static str =
        "%d{%Y-%m-%d %H:%M:%S}%T%t%T%N%T%F%T[%p]%T[%c]%T%f:%l%T%m%n";

    /// Compile `pattern`, flagging (not rejecting) malformed directives
    pub fn new(pattern: impl Into<String>) -> Self {
        let mut format = Self {
            pattern: pattern.into(),
            items: Vec::new(),
            error: false,
        };
        format.init();
        format
    }

    /// Compile `pattern`, failing on the first malformed directive
    ///
    /// ```
    /// use sylar_log::LogFormat;
    ///
    /// assert!(LogFormat::parse("[%p] %m%n").is_ok());
    /// assert!(LogFormat::parse("[%q] %m%n").is_err());
    /// ```
    pub fn parse(pattern: impl Into<String>) -> Result<Self> {
        let format = Self::new(pattern);
        if let Some(marker) = format.items.iter().find_map(|item| match item {
            FormatItem::Error(marker) => Some(marker.clone()),
            _ => None,
        }) {
            return Err(LoggerError::formatter(format.pattern, marker));
        }
        Ok(format)
    }

    fn init(&mut self) {
        let pattern = self.pattern.as_str();
        let mut items = Vec::new();
        let mut literal = String::new();
        let mut error = false;
        let mut chars = pattern.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let Some((_, directive)) = chars.next() else {
                flush_literal(&mut literal, &mut items);
                items.push(FormatItem::Error(
                    "<<pattern_error: dangling '%' at end of pattern>>".to_string(),
                ));
                error = true;
                break;
            };

            if directive == '%' {
                literal.push('%');
                continue;
            }

            let mut arg = None;
            if let Some(&(open, '{')) = chars.peek() {
                chars.next();
                let close = chars
                    .by_ref()
                    .find_map(|(i, c)| (c == '}').then_some(i));
                match close {
                    Some(close) => arg = Some(&pattern[open + 1..close]),
                    None => {
                        flush_literal(&mut literal, &mut items);
                        items.push(FormatItem::Error(format!(
                            "<<pattern_error: unterminated '{{' after %{}>>",
                            directive
                        )));
                        error = true;
                        break;
                    }
                }
            }

            flush_literal(&mut literal, &mut items);
            match FormatItem::from_directive(directive, arg) {
                Ok(item) => items.push(item),
                Err(marker) => {
                    items.push(FormatItem::Error(marker));
                    error = true;
                }
            }
        }
        flush_literal(&mut literal, &mut items);

        self.items = items;
        self.error = error;
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Whether compilation hit an unknown or malformed directive
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Render `event` as dispatched by `logger` at `level`.
    ///
    /// A renderer that fails is replaced by `<<render_error>>` and reported
    /// on stdout; the items after it are still rendered.
    pub fn format(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.content().len() + 32);
        for item in &self.items {
            // Writing into a String only fails if the renderer does
            if item.render(&mut out, logger.name(), level, event).is_err() {
                println!(
                    "[LOGGER ERROR] Pattern '{}' failed to render {:?}",
                    self.pattern, item
                );
                out.push_str("<<render_error>>");
            }
        }
        out
    }

    /// Render straight into an output stream
    pub fn write_to<W: io::Write + ?Sized>(
        &self,
        writer: &mut W,
        logger: &Logger,
        level: LogLevel,
        event: &LogEvent,
    ) -> io::Result<()> {
        writer.write_all(self.format(logger, level, event).as_bytes())
    }

    /// Apply every renderer in order
    pub fn render<W: fmt::Write>(
        &self,
        out: &mut W,
        logger_name: &str,
        level: LogLevel,
        event: &LogEvent,
    ) -> fmt::Result {
        for item in &self.items {
            item.render(out, logger_name, level, event)?;
        }
        Ok(())
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATTERN)
    }
}

fn flush_literal(literal: &mut String, items: &mut Vec<FormatItem>) {
    if !literal.is_empty() {
        items.push(FormatItem::Literal(std::mem::take(literal)));
    }
}
