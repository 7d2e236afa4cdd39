//! File logging example
//!
//! Demonstrates logging to both console and file appenders simultaneously.
//!
//! Run with: cargo run --example file_logging

use std::sync::Arc;
use sylar_log::prelude::*;
use sylar_log::{info, warn};

fn main() -> Result<()> {
    println!("=== Sylar Log - File Logging Example ===\n");

    let file = Arc::new(FileLogAppender::new("application.log"));
    if !file.reopen() {
        eprintln!("Could not open application.log");
    }

    let logger = Logger::builder()
        .name("app")
        .pattern("%d [%p] %c %f:%l %m%n")
        .appender(StdoutLogAppender::new().with_level(LogLevel::Warn))
        .shared_appender(file.clone())
        .build()?;

    for i in 1..=5 {
        info!(logger, "Processing item {}/5", i);
        if i == 3 {
            warn!(logger, "Item 3 took longer than expected");
        }
    }

    // Simulate an external rotation: move the file away and reopen
    logger.flush()?;
    if std::fs::rename("application.log", "application.log.1").is_ok() && file.reopen() {
        info!(logger, "Log file reopened after rotation");
    }

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
