//! Logger metrics for observability
//!
//! Counts what happened at the gate and during fan-out. A logger and its
//! copies share one set of counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters
///
/// # Example
///
/// ```
/// use namedlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the gate and were handed to the appenders
    emitted: AtomicU64,

    /// Records rejected by the gate
    suppressed: AtomicU64,

    /// Emitted records for which at least one appender failed
    failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of emitted records with an appender failure, as a percentage
    ///
    /// Returns 0.0 if nothing has been emitted.
    pub fn failure_rate(&self) -> f64 {
        let emitted = self.emitted() as f64;
        if emitted == 0.0 {
            0.0
        } else {
            (self.failed() as f64 / emitted) * 100.0
        }
    }

    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
