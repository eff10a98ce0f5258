//! Metrics registry
//!
//! - Counters only, plus the current chirp count
//! - Reset only on process start
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters.
///
/// Uses Relaxed ordering; metrics need no cross-counter consistency.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    chirps_created: AtomicU64,
    chirps_rejected_invalid: AtomicU64,
    chirps_rejected_too_long: AtomicU64,
    persist_failures: AtomicU64,
    list_requests: AtomicU64,
    chirps_stored: AtomicU64,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub chirps_created: u64,
    pub chirps_rejected_invalid: u64,
    pub chirps_rejected_too_long: u64,
    pub persist_failures: u64,
    pub list_requests: u64,
    pub chirps_stored: u64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chirp was persisted
    pub fn increment_chirps_created(&self) {
        self.chirps_created.fetch_add(1, Ordering::Relaxed);
        self.chirps_stored.fetch_add(1, Ordering::Relaxed);
    }

    /// Payload could not be decoded
    pub fn increment_rejected_invalid(&self) {
        self.chirps_rejected_invalid.fetch_add(1, Ordering::Relaxed);
    }

    /// Body exceeded the length limit
    pub fn increment_rejected_too_long(&self) {
        self.chirps_rejected_too_long.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_persist_failures(&self) {
        self.persist_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_list_requests(&self) {
        self.list_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Set the stored chirp count (at load)
    pub fn set_chirps_stored(&self, count: u64) {
        self.chirps_stored.store(count, Ordering::Relaxed);
    }

    pub fn chirps_created(&self) -> u64 {
        self.chirps_created.load(Ordering::Relaxed)
    }

    pub fn chirps_stored(&self) -> u64 {
        self.chirps_stored.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            chirps_created: self.chirps_created.load(Ordering::Relaxed),
            chirps_rejected_invalid: self.chirps_rejected_invalid.load(Ordering::Relaxed),
            chirps_rejected_too_long: self.chirps_rejected_too_long.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
            list_requests: self.list_requests.load(Ordering::Relaxed),
            chirps_stored: self.chirps_stored.load(Ordering::Relaxed),
        }
    }
}
