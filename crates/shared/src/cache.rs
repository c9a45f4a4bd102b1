//! TTL-bounded snapshot cache for configuration documents.
//!
//! Configuration changes are rare administrative actions, so readers may
//! observe a stale-but-recently-valid snapshot. The cache is an explicit
//! object passed into whatever component needs it; there is no ambient
//! module-level state.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// A single cached snapshot with its fetch timestamp.
#[derive(Debug, Clone)]
struct Snapshot<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// A thread-safe cache holding at most one value with a bounded TTL.
///
/// `get` returns the cached value only while it is fresh; `put` replaces
/// the snapshot and restarts the TTL clock.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    inner: Mutex<Option<Snapshot<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Create an empty cache with the given time-to-live in seconds.
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs),
            inner: Mutex::new(None),
        }
    }

    /// Return the cached value if it was fetched within the TTL window.
    pub fn get(&self, now: DateTime<Utc>) -> Option<T> {
        let guard = self.inner.lock().ok()?;
        guard
            .as_ref()
            .filter(|snap| now - snap.fetched_at < self.ttl)
            .map(|snap| snap.value.clone())
    }

    /// Store a freshly fetched value.
    pub fn put(&self, value: T, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(Snapshot {
                value,
                fetched_at: now,
            });
        }
    }

    /// Drop the cached value, forcing the next read through to the store.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = None;
        }
    }
}
