//! In-process TTL response cache.
//!
//! A `DashMap` of entries with per-entry deadlines. Expired entries report
//! absent on `get` and are removed lazily at that point; there is no
//! background sweeper. Writes within the TTL window are write-once-read-many
//! in practice, but a later `put` for the same key simply replaces the entry.

use std::time::{Duration, Instant};

use chatgate_core::cache::ResponseCache;
use chatgate_types::error::CacheError;
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Concurrent in-memory implementation of `ResponseCache`.
#[derive(Debug, Default)]
pub struct MemoryResponseCache {
    entries: DashMap<String, Entry>,
}

impl MemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for MemoryResponseCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        } else {
            return Ok(None);
        }
        // Deadline passed: drop the stale entry.
        self.entries.remove(key);
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = MemoryResponseCache::new();
        cache
            .put("k", "cached reply", Duration::from_secs(60))
            .await
            .unwrap();
        let value = cache.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some("cached reply"));
    }

    #[tokio::test]
    async fn test_absent_key_is_none() {
        let cache = MemoryResponseCache::new();
        assert!(cache.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_absent() {
        let cache = MemoryResponseCache::new();
        cache
            .put("k", "short lived", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(cache.get("k").await.unwrap().is_none());
        // And the stale entry was dropped, not just hidden.
        assert!(cache.entries.get("k").is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_value_and_ttl() {
        let cache = MemoryResponseCache::new();
        cache
            .put("k", "first", Duration::from_millis(10))
            .await
            .unwrap();
        cache
            .put("k", "second", Duration::from_secs(60))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("second"));
    }
}
