//! Basic usage example
//!
//! Run with: cargo run --example basic_usage

use sylar_log::prelude::*;
use sylar_log::{debug, error, info, warn};

fn main() -> Result<()> {
    println!("=== Sylar Log - Basic Usage Example ===\n");

    // The global root logger prints to stdout with the default pattern
    let root = LoggerManager::global().root();
    info!(root, "Application started");
    debug!(root, "Loading configuration...");

    // Named loggers fall back to root until they get appenders of their own
    let db = LoggerManager::global().get_logger("db");
    warn!(db, "Connection pool at {}% capacity", 85);

    // A logger with its own pattern and threshold
    let api = Logger::builder()
        .name("api")
        .level(LogLevel::Info)
        .pattern("%d{%H:%M:%S} [%p] %c %f:%l - %m%n")
        .appender(StdoutLogAppender::new())
        .build()?;

    debug!(api, "filtered out, below Info");
    info!(api, "GET /users -> {}", 200);
    error!(api, "POST /orders -> {}", 500);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
