//! Time-bounded caching of provider and model results

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Keyed cache whose entries expire a fixed duration after insertion.
///
/// Expired entries are evicted when read; there is no background sweeper and
/// no explicit invalidation. Two callers racing on the same missing key both
/// recompute, which is redundant work but never a wrong answer.
pub struct TtlCache<K, V> {
    entries: DashMap<K, CachedEntry<V>>,
    ttl: Duration,
}

struct CachedEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Create a cache whose entries expire `ttl` after insertion
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Store a value under the given key, resetting its expiry
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CachedEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Get a value if its entry has not expired (evict on read)
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).and_then(|entry| {
            if entry.stored_at.elapsed() > self.ttl {
                drop(entry); // Drop the read lock before evicting
                self.entries.remove(key);
                None
            } else {
                Some(entry.value.clone())
            }
        })
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of entries, expired ones included until they are read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cache_insert_and_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("AAPL".to_string(), 150.0);

        assert_eq!(cache.get(&"AAPL".to_string()), Some(150.0));
        assert_eq!(cache.get(&"MSFT".to_string()), None);
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = TtlCache::new(Duration::from_millis(50));
        cache.insert("AAPL".to_string(), 150.0);

        // Should exist immediately
        assert_eq!(cache.get(&"AAPL".to_string()), Some(150.0));

        // Wait for expiration
        thread::sleep(Duration::from_millis(80));

        // Should be evicted on read
        assert_eq!(cache.get(&"AAPL".to_string()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_resets_expiry() {
        let cache = TtlCache::new(Duration::from_millis(80));
        cache.insert("AAPL".to_string(), 150.0);

        thread::sleep(Duration::from_millis(50));
        cache.insert("AAPL".to_string(), 151.0);
        thread::sleep(Duration::from_millis(50));

        // The second insert restarted the clock
        assert_eq!(cache.get(&"AAPL".to_string()), Some(151.0));
    }

    #[test]
    fn test_tuple_keys() {
        let cache: TtlCache<(String, usize), Vec<f64>> = TtlCache::new(Duration::from_secs(60));
        cache.insert(("AAPL".to_string(), 1825), vec![1.0, 2.0]);

        assert_eq!(
            cache.get(&("AAPL".to_string(), 1825)),
            Some(vec![1.0, 2.0])
        );
        assert_eq!(cache.get(&("AAPL".to_string(), 30)), None);
    }
}
