//! Logger metrics for observability
//!
//! Provides counters for monitoring logger health: lines written, write
//! failures swallowed by the terminal logging calls, field values that fell
//! back to a debug dump, and buffer pool reuse.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use ctx_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_write_failure();
/// metrics.record_logged();
///
/// assert_eq!(metrics.write_failures(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines successfully handed to their destination
    total_logged: AtomicU64,

    /// Lines whose destination write failed
    write_failures: AtomicU64,

    /// Field values rendered through the debug-dump fallback
    encode_fallbacks: AtomicU64,

    /// Renders that reused a pooled buffer
    pool_hits: AtomicU64,

    /// Renders that had to allocate a buffer
    pool_misses: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            encode_fallbacks: AtomicU64::new(0),
            pool_hits: AtomicU64::new(0),
            pool_misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn encode_fallbacks(&self) -> u64 {
        self.encode_fallbacks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn pool_hits(&self) -> u64 {
        self.pool_hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn pool_misses(&self) -> u64 {
        self.pool_misses.load(Ordering::Relaxed)
    }

    /// Record a successfully written line, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed write, returning the previous count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_encode_fallbacks(&self, count: u64) {
        if count > 0 {
            self.encode_fallbacks.fetch_add(count, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_pool_use(&self, reused: bool) {
        if reused {
            self.pool_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.pool_misses.fetch_add(1, Ordering::Relaxed);
        }
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
            total_logged: AtomicU64::new(self.total_logged()),
            write_failures: AtomicU64::new(self.write_failures()),
            encode_fallbacks: AtomicU64::new(self.encode_fallbacks()),
            pool_hits: AtomicU64::new(self.pool_hits()),
            pool_misses: AtomicU64::new(self.pool_misses()),
        }
    }
}
