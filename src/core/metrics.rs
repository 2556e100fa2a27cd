//! Logger metrics for observability
//!
//! Counters describing what the hierarchy did with log calls: how many were
//! dispatched, how many a logger threshold filtered out, and how many
//! outputter invocations panicked.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics of one logger context
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages that passed their logger's threshold
    dispatched: AtomicU64,

    /// Log calls rejected by their logger's threshold
    filtered: AtomicU64,

    /// Outputter invocations that panicked
    outputter_panics: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            outputter_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn outputter_panics(&self) -> u64 {
        self.outputter_panics.load(Ordering::Relaxed)
    }

    /// Record a dispatched message, returning the previous count
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_outputter_panic(&self) -> u64 {
        self.outputter_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of log calls rejected by thresholds, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been logged.
    pub fn filter_rate(&self) -> f64 {
        let filtered = self.filtered() as f64;
        let total = self.dispatched() as f64 + filtered;
        if total == 0.0 {
            0.0
        } else {
            (filtered / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.outputter_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            filtered: AtomicU64::new(self.filtered()),
            outputter_panics: AtomicU64::new(self.outputter_panics()),
        }
    }
}
