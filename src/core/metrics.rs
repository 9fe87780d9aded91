//! Dispatch queue metrics for observability
//!
//! Counters for monitoring queue health: accepted messages, drops under the
//! overflow policy, queue-full and producer-block events.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatch queue observability
///
/// # Example
///
/// ```
/// use rust_log_registry::QueueMetrics;
///
/// let metrics = QueueMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.enqueued_count(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct QueueMetrics {
    /// Messages accepted into the queue
    enqueued_count: AtomicU64,

    /// Messages dropped under the overflow policy or during teardown
    dropped_count: AtomicU64,

    /// Number of times a producer found the queue full
    queue_full_events: AtomicU64,

    /// Number of times a producer suspended waiting for space
    block_events: AtomicU64,
}

impl QueueMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Drop rate as a percentage (0.0 - 100.0) of all messages offered.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.enqueued_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.enqueued_count.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

impl Default for QueueMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for QueueMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            enqueued_count: AtomicU64::new(self.enqueued_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}
