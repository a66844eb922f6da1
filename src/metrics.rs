use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Album lifecycle counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub albums_created: Arc<AtomicU64>,
    pub albums_updated: Arc<AtomicU64>,
    pub albums_removed: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            albums_created: Arc::new(AtomicU64::new(0)),
            albums_updated: Arc::new(AtomicU64::new(0)),
            albums_removed: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_albums_created(&self) {
        self.albums_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_albums_updated(&self) {
        self.albums_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_albums_removed(&self) {
        self.albums_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            albums_created: self.albums_created.load(Ordering::Relaxed),
            albums_updated: self.albums_updated.load(Ordering::Relaxed),
            albums_removed: self.albums_removed.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub albums_created: u64,
    pub albums_updated: u64,
    pub albums_removed: u64,
    pub uptime_seconds: u64,
}
