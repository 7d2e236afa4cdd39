//! Logger metrics for observability
//!
//! Counters for how many events a logger dispatched, filtered out by its
//! level, or failed to deliver to at least one appender.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use sylar_log::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Events that passed the logger's level and were fanned out
    total_logged: AtomicU64,

    /// Events rejected by the logger's level
    filtered_count: AtomicU64,

    /// Events for which at least one appender returned an error
    failed_count: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// Record a dispatched event, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }
}
