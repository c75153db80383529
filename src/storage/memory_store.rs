//! In-memory TTL store
//!
//! Eviction is lazy: expired entries are dropped when read, and a full sweep
//! runs only when a write finds the store at its high-water mark. There is no
//! background cleanup task.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::storage::{KeyValueStore, StoreValue};

/// Store statistics
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

impl StoreStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache entry with an absolute expiry
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expiry: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expiry: Instant::now() + ttl,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expiry
    }
}

/// In-memory store backed by a `HashMap` behind a tokio `RwLock`
#[derive(Debug)]
pub struct InMemoryStore<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    stats: RwLock<StoreStats>,
    high_water_mark: usize,
    _value: PhantomData<V>,
}

impl<V: StoreValue> InMemoryStore<V> {
    pub fn new(high_water_mark: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: RwLock::new(StoreStats::default()),
            high_water_mark: high_water_mark.max(1),
            _value: PhantomData,
        }
    }

    /// Number of stored entries, expired or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn stats(&self) -> StoreStats {
        let mut stats = self.stats.read().await.clone();
        stats.entries = self.entries.read().await.len();
        stats
    }

    /// Drop every expired entry, returning how many were removed
    fn evict_expired(entries: &mut HashMap<String, CacheEntry<V>>) -> usize {
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Drop the entry closest to expiry
    fn evict_nearest_expiry(entries: &mut HashMap<String, CacheEntry<V>>) -> usize {
        let victim = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expiry)
            .map(|(key, _)| key.clone());
        match victim {
            Some(key) => {
                entries.remove(&key);
                1
            }
            None => 0,
        }
    }
}

#[async_trait]
impl<V: StoreValue> KeyValueStore<V> for InMemoryStore<V> {
    async fn get(&self, key: &str) -> Result<Option<V>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    let value = entry.value.clone();
                    drop(entries);
                    self.stats.write().await.hits += 1;
                    return Ok(Some(value));
                }
                Some(_) => {}
                None => {
                    drop(entries);
                    self.stats.write().await.misses += 1;
                    return Ok(None);
                }
            }
        }

        // expired: remove on read
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            drop(entries);
            let mut stats = self.stats.write().await;
            stats.evictions += 1;
            stats.misses += 1;
        } else {
            drop(entries);
            self.stats.write().await.misses += 1;
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().await;

        let mut evicted = 0;
        if entries.len() >= self.high_water_mark && !entries.contains_key(key) {
            evicted += Self::evict_expired(&mut entries);
            while entries.len() >= self.high_water_mark {
                let removed = Self::evict_nearest_expiry(&mut entries);
                if removed == 0 {
                    break;
                }
                evicted += removed;
            }
            debug!("Store sweep: {} entries left, {} evicted", entries.len(), evicted);
        }

        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
        drop(entries);

        if evicted > 0 {
            self.stats.write().await.evictions += evicted as u64;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_get_never_returns_expired_entry() {
        let store: InMemoryStore<String> = InMemoryStore::new(100);
        store.set("k", "v".into(), Duration::from_secs(60)).await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_runs_only_at_high_water_mark() {
        let store: InMemoryStore<u32> = InMemoryStore::new(3);
        store.set("a", 1, Duration::from_secs(1)).await.unwrap();
        store.set("b", 2, Duration::from_secs(1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;

        // below the mark: expired entries stay until read or swept
        store.set("c", 3, Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.len().await, 3);

        // at the mark: the write sweeps expired entries first
        store.set("d", 4, Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.len().await, 2);
        assert_eq!(store.stats().await.evictions, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evicts_nearest_expiry_when_sweep_is_not_enough() {
        let store: InMemoryStore<u32> = InMemoryStore::new(2);
        store.set("long", 1, Duration::from_secs(600)).await.unwrap();
        store.set("short", 2, Duration::from_secs(30)).await.unwrap();
        store.set("new", 3, Duration::from_secs(300)).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.get("long").await.unwrap(), Some(1));
        assert_eq!(store.get("new").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_overwrite_and_delete() {
        let store: InMemoryStore<u32> = InMemoryStore::new(10);
        store.set("k", 1, Duration::from_secs(60)).await.unwrap();
        store.set("k", 2, Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(2));

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("x", 1, Duration::from_secs(60)).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let store: InMemoryStore<u32> = InMemoryStore::new(10);
        store.set("k", 1, Duration::from_secs(60)).await.unwrap();
        store.get("k").await.unwrap();
        store.get("missing").await.unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
