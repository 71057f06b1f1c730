use crate::domain::ports::CacheStore;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// Default sliding expiration for cached entries.
pub const DEFAULT_SLIDING_TTL: Duration = Duration::from_secs(300);

#[derive(Clone)]
struct CacheEntry {
    value: Value,
    sliding_ttl: Duration,
    last_access: Instant,
    absolute_expiry: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        let within_sliding = now < self.last_access + self.sliding_ttl;
        let within_absolute = self.absolute_expiry.is_none_or(|deadline| now < deadline);
        within_sliding && within_absolute
    }
}

/// In-process cache with sliding expiration and tracked-key bulk clearing.
///
/// Reads go straight to the concurrent map. `set` and `clear_all` both hold the
/// `tracked` lock while touching entries, so a clear never misses a key being
/// added concurrently and never leaves a cleared key behind.
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    tracked: Mutex<HashSet<String>>,
    sliding_ttl: Duration,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDING_TTL)
    }
}

impl MemoryCache {
    pub fn new(sliding_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            tracked: Mutex::new(HashSet::new()),
            sliding_ttl,
        }
    }

    /// Number of keys issued since the last `clear_all` that have not expired
    /// out of the cache.
    pub fn tracked_len(&self) -> usize {
        self.tracked.lock().len()
    }

    /// Drops every expired entry and forgets its key. Returns how many were
    /// removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut tracked = self.tracked.lock();
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            let live = entry.is_live(now);
            if !live {
                tracked.remove(key);
                removed += 1;
            }
            live
        });
        if removed > 0 {
            tracing::debug!(removed, "purged expired cache entries");
        }
        removed
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        if let Some(mut entry) = self.entries.get_mut(key) {
            if entry.is_live(now) {
                entry.last_access = now;
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }
        // Guard released above; remove only if nobody refreshed it meanwhile.
        let mut tracked = self.tracked.lock();
        if self.entries.remove_if(key, |_, entry| !entry.is_live(now)).is_some() {
            tracked.remove(key);
        }
        None
    }

    fn set(&self, key: &str, value: Value, absolute_ttl: Option<Duration>) {
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            sliding_ttl: self.sliding_ttl,
            last_access: now,
            absolute_expiry: absolute_ttl.map(|ttl| now + ttl),
        };

        let mut tracked = self.tracked.lock();
        self.entries.insert(key.to_string(), entry);
        tracked.insert(key.to_string());
    }

    fn clear_all(&self) {
        let mut tracked = self.tracked.lock();
        for key in tracked.iter() {
            self.entries.remove(key);
        }
        let cleared = tracked.len();
        tracked.clear();
        tracing::debug!(cleared, "cleared cache");
    }
}
