use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Per-stage metrics collector.
///
/// Clones share the same counters, so a handle taken before a run observes
/// the values recorded during it.
#[derive(Debug, Clone)]
pub struct StageMetrics {
    /// Items the stage accepted (bytes, tokens or heap entries)
    items_processed: Arc<AtomicU64>,
    /// Items the stage discarded
    items_dropped: Arc<AtomicU64>,
    /// Wall time spent in the stage
    elapsed: Arc<Mutex<Duration>>,
}

impl StageMetrics {
    /// Create a new metrics collector for a stage
    pub fn new() -> Self {
        Self {
            items_processed: Arc::new(AtomicU64::new(0)),
            items_dropped: Arc::new(AtomicU64::new(0)),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Record a processed item
    pub fn record_processed(&self) {
        self.add_processed(1);
    }

    /// Record `n` processed items at once
    pub fn add_processed(&self, n: u64) {
        self.items_processed.fetch_add(n, Ordering::Relaxed);
    }

    /// Record a dropped item
    pub fn record_dropped(&self) {
        self.add_dropped(1);
    }

    pub fn add_dropped(&self, n: u64) {
        self.items_dropped.fetch_add(n, Ordering::Relaxed);
    }

    /// Add time spent in the stage
    pub fn record_elapsed(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Get the total number of items processed
    pub fn total_processed(&self) -> u64 {
        self.items_processed.load(Ordering::Relaxed)
    }

    /// Get the total number of items dropped
    pub fn total_dropped(&self) -> u64 {
        self.items_dropped.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }

    /// Items processed per second of stage time
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.total_processed() as f64 / secs
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        self.items_processed.store(0, Ordering::Relaxed);
        self.items_dropped.store(0, Ordering::Relaxed);
        *self.elapsed.lock() = Duration::ZERO;
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_processed: self.total_processed(),
            total_dropped: self.total_dropped(),
            throughput: self.throughput(),
            elapsed: self.elapsed(),
        }
    }
}

impl Default for StageMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub total_processed: u64,
    pub total_dropped: u64,
    pub throughput: f64,
    pub elapsed: Duration,
}

impl MetricsSnapshot {
    /// Format metrics as a human-readable string
    pub fn format(&self) -> String {
        format!(
            "Processed: {}, Dropped: {}, Throughput: {:.2} items/s, Elapsed: {:.3}ms",
            self.total_processed,
            self.total_dropped,
            self.throughput,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}
