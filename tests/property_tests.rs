//! Property-based tests for sylar_log using proptest

use proptest::prelude::*;
use sylar_log::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// to_str and from_string agree for every named level
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(LogLevel::from_string(&text), level);
    }

    /// Strings that name no level become Unknown instead of failing
    #[test]
    fn test_log_level_unknown_fallback(s in "[a-z]{6,12}") {
        prop_assume!(s != "warning");
        prop_assert_eq!(LogLevel::from_string(&s), LogLevel::Unknown);
    }

    /// Test that LogLevel ordering is consistent with discriminants
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 > level2, val1 > val2);
    }
}

// ============================================================================
// LogFormat Tests
// ============================================================================

fn render(format: &LogFormat, message: &str) -> String {
    let logger = Logger::new("prop");
    let event = LogEvent::new(LogLevel::Info, "prop.rs", 1).with_message(message);
    format.format(&logger, LogLevel::Info, &event)
}

proptest! {
    /// Text without '%' compiles to itself
    #[test]
    fn test_literal_pattern_renders_verbatim(text in "[^%]{0,64}") {
        let format = LogFormat::new(text.clone());
        prop_assert!(!format.is_error());
        prop_assert_eq!(render(&format, "ignored"), text);
    }

    /// Doubling every '%' escapes it
    #[test]
    fn test_escaped_percent_renders_verbatim(text in "[a-z% ]{0,32}") {
        let pattern = text.replace('%', "%%");
        let format = LogFormat::new(pattern);
        prop_assert!(!format.is_error());
        prop_assert_eq!(render(&format, "ignored"), text);
    }

    /// The message directive passes content through untouched
    #[test]
    fn test_message_directive(message in ".{0,64}") {
        let format = LogFormat::new("<%m>");
        prop_assert_eq!(render(&format, &message), format!("<{}>", message));
    }

    /// Compilation never panics, and the error flag matches parse()
    #[test]
    fn test_arbitrary_patterns_compile(pattern in ".{0,48}") {
        let format = LogFormat::new(pattern.clone());
        prop_assert_eq!(format.is_error(), LogFormat::parse(pattern).is_err());
        let _ = render(&format, "x");
    }
}
