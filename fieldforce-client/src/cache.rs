//! Tag-indexed query cache.
//!
//! Entries are keyed by endpoint + arguments and hold the decoded JSON
//! value plus the tags that describe which data domain it belongs to.
//! Mutations invalidate by tag; invalidation drops the entries so the next
//! read refetches. The whole cache is dropped on logout. There is no other
//! eviction policy.

use fieldforce_core::{ApiFailure, CacheKey, CacheTag};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

struct CacheEntry {
    value: serde_json::Value,
    tags: Vec<CacheTag>,
}

/// Process-wide cache for query results.
///
/// In-flight requests coalesce per key: a second caller for the same key
/// waits for the first fetch and then reads the cached result instead of
/// issuing a duplicate request.
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    inflight: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `fetch` and cache its
    /// result under the given tags.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: CacheKey,
        tags: &[CacheTag],
        fetch: F,
    ) -> Result<T, ApiFailure>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiFailure>>,
    {
        if let Some(value) = self.lookup(&key).await {
            return decode(value);
        }

        let gate = self.gate(&key).await;
        let _held = gate.lock().await;

        // A coalesced caller lands here after the leader finished.
        if let Some(value) = self.lookup(&key).await {
            return decode(value);
        }

        let value = fetch().await?;
        let json = serde_json::to_value(&value).map_err(|err| ApiFailure::Decode(err.to_string()))?;
        self.entries.lock().await.insert(
            key.clone(),
            CacheEntry {
                value: json,
                tags: tags.to_vec(),
            },
        );
        self.inflight.lock().await.remove(&key);
        Ok(value)
    }

    /// Drop every entry sharing any of the given tags.
    pub async fn invalidate(&self, tags: &[CacheTag]) {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|tag| tags.contains(tag)));
        let dropped = before - entries.len();
        if dropped > 0 {
            debug!(?tags, dropped, "cache invalidated");
        }
    }

    /// Drop everything, in-flight bookkeeping included. Used on logout.
    pub async fn reset(&self) {
        self.entries.lock().await.clear();
        self.inflight.lock().await.clear();
        debug!("cache reset");
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn lookup(&self, key: &CacheKey) -> Option<serde_json::Value> {
        self.entries.lock().await.get(key).map(|entry| entry.value.clone())
    }

    async fn gate(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        self.inflight
            .lock()
            .await
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiFailure> {
    serde_json::from_value(value).map_err(|err| ApiFailure::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn second_read_is_a_cache_hit() {
        let cache = QueryCache::new();
        let fetches = AtomicUsize::new(0);
        let key = CacheKey::bare("/headquarters");

        for _ in 0..2 {
            let value: u32 = cache
                .get_or_fetch(key.clone(), &[CacheTag::Hq], || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(7u32)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let cache = QueryCache::new();
        let key = CacheKey::bare("/employees");

        let result: Result<u32, _> = cache
            .get_or_fetch(key.clone(), &[CacheTag::Employee], || async {
                Err(ApiFailure::status(500))
            })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty().await);

        let value: u32 = cache
            .get_or_fetch(key, &[CacheTag::Employee], || async { Ok(3u32) })
            .await
            .unwrap();
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn invalidation_drops_only_matching_tags() {
        let cache = QueryCache::new();
        cache
            .get_or_fetch(CacheKey::bare("/employees"), &[CacheTag::Employee], || async {
                Ok(1u32)
            })
            .await
            .unwrap();
        cache
            .get_or_fetch(CacheKey::bare("/headquarters"), &[CacheTag::Hq], || async {
                Ok(2u32)
            })
            .await
            .unwrap();

        cache.invalidate(&[CacheTag::Employee]).await;
        assert_eq!(cache.len().await, 1);

        cache.reset().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn coalesced_caller_reads_leader_result() {
        let cache = Arc::new(QueryCache::new());
        let fetches = Arc::new(AtomicUsize::new(0));
        let key = CacheKey::bare("/leaves");

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let fetches = fetches.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(key, &[CacheTag::Leave], || async move {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok(42u32)
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 42);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
