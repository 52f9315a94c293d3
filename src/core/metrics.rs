//! Logger metrics for observability
//!
//! Counters for the emission pipeline and the retention manager.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use osiris_log::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_file_removed();
///
/// assert_eq!(metrics.records_emitted(), 1);
/// assert_eq!(metrics.files_removed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Log calls that completed a full emission cycle
    records_emitted: AtomicU64,

    /// Failed console or file writes
    write_failures: AtomicU64,

    /// Retention passes run
    cleanup_passes: AtomicU64,

    /// Log files deleted by retention
    files_removed: AtomicU64,

    /// Log files retention failed to delete
    cleanup_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_emitted: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            cleanup_passes: AtomicU64::new(0),
            files_removed: AtomicU64::new(0),
            cleanup_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_emitted(&self) -> u64 {
        self.records_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cleanup_passes(&self) -> u64 {
        self.cleanup_passes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn files_removed(&self) -> u64 {
        self.files_removed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cleanup_failures(&self) -> u64 {
        self.cleanup_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.records_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_cleanup_pass(&self) -> u64 {
        self.cleanup_passes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_removed(&self) -> u64 {
        self.files_removed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_cleanup_failure(&self) -> u64 {
        self.cleanup_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_emitted.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.cleanup_passes.store(0, Ordering::Relaxed);
        self.files_removed.store(0, Ordering::Relaxed);
        self.cleanup_failures.store(0, Ordering::Relaxed);
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
            records_emitted: AtomicU64::new(self.records_emitted()),
            write_failures: AtomicU64::new(self.write_failures()),
            cleanup_passes: AtomicU64::new(self.cleanup_passes()),
            files_removed: AtomicU64::new(self.files_removed()),
            cleanup_failures: AtomicU64::new(self.cleanup_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.records_emitted(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.cleanup_passes(), 0);
        assert_eq!(metrics.files_removed(), 0);
        assert_eq!(metrics.cleanup_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_write_failure(), 0);
        assert_eq!(metrics.record_write_failure(), 1);
        assert_eq!(metrics.write_failures(), 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_emitted();
        metrics.record_cleanup_pass();
        metrics.record_cleanup_failure();

        metrics.reset();

        assert_eq!(metrics.records_emitted(), 0);
        assert_eq!(metrics.cleanup_passes(), 0);
        assert_eq!(metrics.cleanup_failures(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_file_removed();

        let snapshot = metrics.clone();
        metrics.record_file_removed();

        assert_eq!(metrics.files_removed(), 2);
        assert_eq!(snapshot.files_removed(), 1);
    }
}
