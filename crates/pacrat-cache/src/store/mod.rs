//! In-memory store with TTL expiry and capacity eviction.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;

use crate::key::CacheKey;

/// Default lifetime for a cached provider result
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default maximum number of live entries
pub const DEFAULT_CAPACITY: usize = 128;

#[derive(Debug)]
struct Entry {
    /// Complete normalized result; never a partial document
    value: Value,
    expires_at: Instant,
    last_used: u64,
}

impl Entry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    /// Monotonic recency counter; bumped on every access
    tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Cache mapping canonical request keys to normalized provider results.
///
/// Expired entries are treated as absent and purged lazily. Inserting a new
/// key into a full store evicts the least recently used live entry first.
/// A single mutex serializes all access; every method is synchronous, so no
/// lock is ever held across an await point.
///
/// Instances are constructed explicitly and passed to the providers that
/// share them; there is no process-global singleton, which lets tests run
/// against isolated caches.
#[derive(Debug)]
pub struct QueryCache {
    inner: Mutex<Inner>,
    capacity: usize,
    default_ttl: Duration,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` entries, each living for
    /// `default_ttl` unless overridden at insert time.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        QueryCache {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            default_ttl,
        }
    }

    /// Create a cache with the default capacity and TTL
    pub fn with_defaults() -> Self {
        QueryCache::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    /// Return the stored value if present and not expired.
    ///
    /// An expired entry is removed on access and reported as a miss. A hit
    /// refreshes the entry's recency.
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        inner.tick += 1;
        let tick = inner.tick;
        if let Some(entry) = inner.entries.get_mut(key.as_str()) {
            if entry.is_fresh(now) {
                entry.last_used = tick;
                let value = entry.value.clone();
                inner.hits += 1;
                return Some(value);
            }
            inner.entries.remove(key.as_str());
        }
        inner.misses += 1;
        None
    }

    /// Insert or overwrite an entry with the default TTL
    pub fn put(&self, key: CacheKey, value: Value) {
        self.put_with_ttl(key, value, self.default_ttl);
    }

    /// Insert or overwrite an entry that expires after `ttl`.
    ///
    /// Expired entries are swept before the capacity check so they never
    /// count against it or win a reprieve by being the eviction victim.
    pub fn put_with_ttl(&self, key: CacheKey, value: Value, ttl: Duration) {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        inner.tick += 1;
        let tick = inner.tick;

        inner.entries.retain(|_, entry| entry.is_fresh(now));

        if !inner.entries.contains_key(key.as_str()) && inner.entries.len() >= self.capacity {
            let victim = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(name, _)| name.clone());
            if let Some(victim) = victim {
                inner.entries.remove(&victim);
                inner.evictions += 1;
            }
        }

        inner.entries.insert(
            key.into_string(),
            Entry {
                value,
                expires_at: now + ttl,
                last_used: tick,
            },
        );
    }

    /// Empty the store (used for tests and explicit resets)
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Number of entries currently held, expired ones included until the
    /// next sweep touches them
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.entries.len(),
            capacity: self.capacity,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored entries
    pub entries: usize,
    /// Maximum number of live entries
    pub capacity: usize,
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that found nothing usable
    pub misses: u64,
    /// Entries removed to respect the capacity bound
    pub evictions: u64,
}
