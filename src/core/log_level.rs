//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    /// Sentinel for names that do not map to a level
    Unknown = 0,
    #[default]
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// All levels that have a textual name, in ascending severity
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Unknown => "UNKNOWN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Lenient conversion: names are matched case-insensitively and anything
    /// unrecognised becomes [`LogLevel::Unknown`].
    ///
    /// ```
    /// use sylar_log::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_string("warn"), LogLevel::Warn);
    /// assert_eq!(LogLevel::from_string("verbose"), LogLevel::Unknown);
    /// ```
    pub fn from_string(s: &str) -> Self {
        s.parse().unwrap_or(LogLevel::Unknown)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Unknown => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width/alignment flags like {:5} apply
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_both_cases() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_string(level.to_str()), level);
            assert_eq!(LogLevel::from_string(&level.to_str().to_lowercase()), level);
        }
    }

    #[test]
    fn test_unknown_sentinel() {
        assert_eq!(LogLevel::from_string(""), LogLevel::Unknown);
        assert_eq!(LogLevel::from_string("verbose"), LogLevel::Unknown);
        // the sentinel's own name is not a parseable level
        assert_eq!(LogLevel::from_string("UNKNOWN"), LogLevel::Unknown);
        assert!("UNKNOWN".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Unknown < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LogLevel::Warn).expect("serialize");
        assert_eq!(json, "\"Warn\"");
        let level: LogLevel = serde_json::from_str("\"Fatal\"").expect("deserialize");
        assert_eq!(level, LogLevel::Fatal);
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:5}", LogLevel::Info), "INFO ");
        assert_eq!(format!("{}", LogLevel::Fatal), "FATAL");
    }
}
