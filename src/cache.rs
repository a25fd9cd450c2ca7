//! Read-through TTL cache for remote payloads.
//!
//! Each cached category (patient detail, patient list, notes) gets its own
//! `TtlCache`; entries carry their own expiry so a runtime config update
//! changes the TTL of future inserts without invalidating what is already
//! cached.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A keyed cache where every entry expires independently.
///
/// A zero TTL disables caching for that insert: `put` becomes a no-op, so
/// callers don't need to special-case disabled categories.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

struct CacheEntry<V> {
    expires_at: Instant,
    value: V,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get a live entry, evicting it if expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a value that expires after `ttl`. Zero TTL means "don't cache".
    pub fn put(&self, key: K, value: V, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CacheEntry {
                    expires_at: Instant::now() + ttl,
                    value,
                },
            );
        }
    }

    /// Drop a single entry (e.g. notes after a save).
    pub fn invalidate(&self, key: &K) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    /// Drop everything.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Number of entries, live or expired-but-unevicted.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
