//! # Result Cache
//!
//! A single keyed slot holding the most recent successful result together
//! with its expiry instant.
//!
//! - `get` returns the value while `now < inserted_at + ttl`, and a miss
//!   afterwards. Expired entries are never removed, only ignored.
//! - A TTL too large to add to the clock means the entry never expires.
//! - `set` replaces the slot atomically and restarts the TTL. Concurrent
//!   writers do not coordinate; the last one to write wins.
//!
//! Time is read from `tokio::time::Instant`, so tests running on a paused
//! runtime control expiry with `tokio::time::advance`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

struct CacheEntry<T> {
    value: Arc<T>,
    /// `None` when `now + ttl` is not representable.
    expires_at: Option<Instant>,
}

/// Single-slot cache shared by every inbound request.
pub struct ResultCache<T> {
    slot: RwLock<Option<CacheEntry<T>>>,
    ttl: Duration,
}

impl<T> ResultCache<T> {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if present and not yet expired.
    pub async fn get(&self) -> Option<Arc<T>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| entry.expires_at.is_none_or(|at| Instant::now() < at))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Stores `value` and resets the expiry to now + TTL.
    pub async fn set(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let entry = CacheEntry {
            value: Arc::clone(&value),
            expires_at: Instant::now().checked_add(self.ttl),
        };
        *self.slot.write().await = Some(entry);
        value
    }
}
