// In-memory TTL cache
//
// Keyed map whose entries expire a fixed duration after insertion.
// Expiry is checked lazily on access; there is no background sweeper, so
// entries nobody reads again stay resident until overwritten or deleted.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default lifetime of a cached entry (15 seconds)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-wide TTL cache
///
/// Every get/set/delete takes the lock for the duration of a single map
/// operation. Concurrent sets to the same key are last-writer-wins.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache whose `insert` uses `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a live entry
    ///
    /// Expired entries are reported as a miss and dropped from the map.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        // Fast path under the read lock
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: evict, re-checking in case a writer refreshed it meanwhile
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite an entry expiring `ttl` from now
    pub async fn set(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Insert or overwrite an entry with the configured TTL
    pub async fn insert(&self, key: K, value: V) {
        self.set(key, value, self.ttl).await;
    }

    /// Remove an entry; no-op when absent
    pub async fn delete(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    /// Number of resident entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
