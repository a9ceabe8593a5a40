//! In-process key/value cache with per-entry absolute expiry.
//!
//! Expired entries are evicted lazily: they stay in the map until the next
//! `get` for their key or a `clear`. There is no capacity bound.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest expiry actually applied; larger TTLs are clamped to it.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Source of "now" for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Insert or overwrite `key`, expiring `ttl` from now. TTLs beyond
    /// `MAX_TTL` are clamped so the expiry never overflows.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = self.clock.now();
        let expires_at = now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now);
        self.entries
            .lock()
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Returns the value while `now <= expires_at`. An expired entry is
    /// removed on the spot. Reads do not extend the expiry.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let expired = now > entries.get(key)?.expires_at;
        if expired {
            entries.remove(key);
            tracing::debug!(key, "Evicted expired cache entry");
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_cache() -> (Arc<ManualClock>, TtlCache<String>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(clock.clone());
        (clock, cache)
    }

    #[test]
    fn test_get_after_set_returns_value() {
        let (_, cache) = manual_cache();
        cache.set("weather:berlin", "sunny".to_string(), Duration::from_secs(300));
        assert_eq!(cache.get("weather:berlin").as_deref(), Some("sunny"));
    }

    #[test]
    fn test_get_missing_key() {
        let (_, cache) = manual_cache();
        assert!(cache.get("weather:nowhere").is_none());
    }

    #[test]
    fn test_entry_valid_exactly_at_expiry() {
        let (clock, cache) = manual_cache();
        cache.set("k", "v".to_string(), Duration::from_secs(300));

        clock.advance(Duration::from_secs(300));
        assert_eq!(cache.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_expired_entry_is_evicted_and_stays_gone() {
        let (clock, cache) = manual_cache();
        cache.set("k", "v".to_string(), Duration::from_secs(300));

        clock.advance(Duration::from_millis(300_001));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_expired_entries_linger_until_read() {
        let (clock, cache) = manual_cache();
        cache.set("a", "1".to_string(), Duration::from_secs(1));
        cache.set("b", "2".to_string(), Duration::from_secs(1));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.len(), 2);

        assert!(cache.get("a").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_read_does_not_extend_ttl() {
        let (clock, cache) = manual_cache();
        cache.set("k", "v".to_string(), Duration::from_secs(10));

        clock.advance(Duration::from_secs(8));
        assert!(cache.get("k").is_some());

        clock.advance(Duration::from_secs(3));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_set_overwrites_value_and_expiry() {
        let (clock, cache) = manual_cache();
        cache.set("k", "old".to_string(), Duration::from_secs(1));
        cache.set("k", "new".to_string(), Duration::from_secs(60));

        clock.advance(Duration::from_secs(30));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_is_readable_until_time_moves() {
        let (clock, cache) = manual_cache();
        cache.set("k", "v".to_string(), Duration::ZERO);
        assert!(cache.get("k").is_some());

        clock.advance(Duration::from_nanos(1));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let (clock, cache) = manual_cache();
        cache.set("weather:berlin", "v".to_string(), Duration::MAX);

        clock.advance(Duration::from_secs(10 * 365 * 24 * 60 * 60));
        assert_eq!(cache.get("weather:berlin").as_deref(), Some("v"));
    }

    #[test]
    fn test_clear_removes_everything() {
        let (_, cache) = manual_cache();
        for key in ["a", "b", "c"] {
            cache.set(key, key.to_string(), Duration::from_secs(60));
        }

        cache.clear();

        assert!(cache.is_empty());
        for key in ["a", "b", "c"] {
            assert!(cache.get(key).is_none());
        }
    }

    #[test]
    fn test_instances_are_independent() {
        let first: TtlCache<u32> = TtlCache::new();
        let second: TtlCache<u32> = TtlCache::new();
        first.set("k", 1, Duration::from_secs(60));

        assert_eq!(first.get("k"), Some(1));
        assert!(second.get("k").is_none());
    }

    #[test]
    fn test_concurrent_access() {
        let cache: Arc<TtlCache<usize>> = Arc::new(TtlCache::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("k{}", i % 10);
                        cache.set(key.clone(), t * 1000 + i, Duration::from_secs(60));
                        assert!(cache.get(&key).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 10);
    }
}
