//! Volatile in-memory tier
//!
//! A thread-safe key→value map with no caller-visible capacity limit.
//! Entries may disappear between operations if the host process is under
//! memory pressure; callers must treat a miss as "not currently resident",
//! never as "never stored".

use moka::future::Cache;

pub(crate) struct MemoryTier<T> {
    cache: Cache<String, T>,
}

impl<T: Clone + Send + Sync + 'static> MemoryTier<T> {
    /// Unbounded cache: eviction policy belongs to the host, not this tier
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: &str, value: T) {
        self.cache.insert(key.to_string(), value).await;
    }

    pub async fn remove(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
