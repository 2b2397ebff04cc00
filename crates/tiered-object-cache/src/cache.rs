//! Lookup coordinator and public cache API
//!
//! `ObjectCache` chains three stages per lookup: the memory tier, then the
//! file tier, then the configured downloader. A hit below the top tier is
//! promoted into the tiers above it before the lookup resolves, so an
//! immediately following lookup for the same key observes the promoted tier.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, warn};

use crate::disk::DiskTier;
use crate::error::{CacheError, Result};
use crate::memory::MemoryTier;
use crate::types::{CacheStats, Deserializer, Downloader, HitStatus, Serializer};

const DEFAULT_BASE_DIR: &str = "tiered-object-cache";

/// A generic two-tier cache over value type `T`.
///
/// Values live in an in-memory tier and, via the configured serializer, in a
/// persistent file tier scoped to the cache's namespace. When both tiers miss,
/// the optional downloader is asked for raw bytes. The cache never inspects
/// `T`; persistence and the downloader path require the codec closures to be
/// configured.
pub struct ObjectCache<T> {
    memory: MemoryTier<T>,
    disk: DiskTier,
    downloader: Option<Downloader>,
    serializer: Option<Serializer<T>>,
    deserializer: Option<Deserializer<T>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> ObjectCache<T> {
    /// Create a cache for `namespace` rooted under the OS temp directory.
    ///
    /// The namespace must be unique per logical cache sharing a storage root;
    /// two instances with the same namespace share (and collide on) the same
    /// directory. Fails only if the directory cannot be created or accessed.
    pub async fn new(namespace: &str) -> Result<Self> {
        Self::with_root(std::env::temp_dir().join(DEFAULT_BASE_DIR), namespace).await
    }

    /// Create a cache for `namespace` under an explicit base directory
    pub async fn with_root(base: impl Into<PathBuf>, namespace: &str) -> Result<Self> {
        if namespace.is_empty() || namespace.contains(['/', '\\']) {
            return Err(CacheError::InvalidNamespace(namespace.to_string()));
        }
        let root = base.into().join(namespace);
        let disk = DiskTier::open(root).await?;
        debug!(namespace, root = %disk.root().display(), "opened cache");
        Ok(Self {
            memory: MemoryTier::new(),
            disk,
            downloader: None,
            serializer: None,
            deserializer: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Set the downloader invoked when both tiers miss
    pub fn set_downloader<F, Fut>(&mut self, f: F)
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Vec<u8>>> + Send + 'static,
    {
        self.downloader = Some(Arc::new(move |key| f(key).boxed()));
    }

    /// Set the encoder used when persisting values to the file tier
    pub fn set_serializer<F>(&mut self, f: F)
    where
        F: Fn(&T) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        self.serializer = Some(Arc::new(f));
    }

    /// Set the decoder used for file-tier reads and downloaded bytes
    pub fn set_deserializer<F>(&mut self, f: F)
    where
        F: Fn(&[u8]) -> Option<T> + Send + Sync + 'static,
    {
        self.deserializer = Some(Arc::new(f));
    }

    /// Look up a key through the fallback chain: memory, then file, then
    /// downloader. Returns the value and the stage that produced it, or
    /// `None` when all three stages miss.
    ///
    /// Decode failures, unreadable files, and downloader failures all resolve
    /// as a miss; `find` never returns an error.
    pub async fn find(&self, key: &str) -> Option<(T, HitStatus)> {
        if let Some(value) = self.memory.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "memory hit");
            return Some((value, HitStatus::Memory));
        }

        if let Some(value) = self.read_file_tier(key).await {
            // Promote before resolving so the next find sees the memory tier
            self.memory.insert(key, value.clone()).await;
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "file hit, promoted to memory");
            return Some((value, HitStatus::File));
        }

        if let Some(downloader) = &self.downloader {
            if let Some(data) = downloader(key.to_string()).await {
                if let Some(value) = self.decode(&data) {
                    // Promotion is best-effort: a failed disk write degrades
                    // durability, not the lookup result
                    if let Err(e) = self.disk.set(key, &data).await {
                        warn!(key, error = %e, "failed to persist downloaded entry");
                    }
                    self.memory.insert(key, value.clone()).await;
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key, size = data.len(), "downloader hit");
                    return Some((value, HitStatus::Downloader));
                }
                debug!(key, "downloaded bytes failed to decode, nothing cached");
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Read a key from the memory tier only, bypassing the fallback chain
    pub async fn memory_object(&self, key: &str) -> Option<T> {
        self.memory.get(key).await
    }

    /// Read and decode a key from the file tier only, bypassing the fallback
    /// chain. No promotion happens.
    pub async fn file_object(&self, key: &str) -> Option<T> {
        self.read_file_tier(key).await
    }

    /// Store a value in both tiers. If the serializer is unset or declines
    /// the value, only the memory tier is written.
    pub async fn set_object(&self, key: &str, value: T) -> Result<()> {
        self.memory.insert(key, value.clone()).await;
        if let Some(data) = self.encode(&value) {
            self.disk.set(key, &data).await?;
        } else {
            debug!(key, "no serialized form, file tier left unchanged");
        }
        Ok(())
    }

    /// Store a value in the memory tier only
    pub async fn set_object_for_memory(&self, key: &str, value: T) {
        self.memory.insert(key, value).await;
    }

    /// Store a value in the file tier only
    pub async fn set_object_for_file(&self, key: &str, value: T) -> Result<()> {
        if let Some(data) = self.encode(&value) {
            self.disk.set(key, &data).await?;
        } else {
            debug!(key, "no serialized form, file tier left unchanged");
        }
        Ok(())
    }

    /// Store raw bytes in both tiers: the bytes go to the file tier verbatim
    /// and, when they decode, the decoded value goes to the memory tier.
    pub async fn set_data(&self, key: &str, data: &[u8]) -> Result<()> {
        if let Some(value) = self.decode(data) {
            self.memory.insert(key, value).await;
        }
        self.disk.set(key, data).await
    }

    /// Decode raw bytes into the memory tier only
    pub async fn set_data_for_memory(&self, key: &str, data: &[u8]) {
        if let Some(value) = self.decode(data) {
            self.memory.insert(key, value).await;
        }
    }

    /// Store raw bytes in the file tier only
    pub async fn set_data_for_file(&self, key: &str, data: &[u8]) -> Result<()> {
        self.disk.set(key, data).await
    }

    /// Remove a key from both tiers
    pub async fn remove_object(&self, key: &str) -> Result<()> {
        self.memory.remove(key).await;
        self.disk.remove(key).await
    }

    /// Remove a key from the memory tier, leaving the file tier untouched
    pub async fn remove_object_for_memory(&self, key: &str) {
        self.memory.remove(key).await;
    }

    /// Remove a key from the file tier, leaving the memory tier untouched
    pub async fn remove_object_for_file(&self, key: &str) -> Result<()> {
        self.disk.remove(key).await
    }

    /// Clear both tiers. The memory tier is cleared immediately; the future
    /// completes once the file tier's directory has been deleted and
    /// recreated empty.
    pub async fn remove_all(&self) -> Result<()> {
        self.memory.clear();
        self.disk.clear().await
    }

    /// Current hit/miss counters and memory-tier entry count
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.memory.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Directory backing the file tier
    pub fn root(&self) -> &Path {
        self.disk.root()
    }

    fn encode(&self, value: &T) -> Option<Vec<u8>> {
        self.serializer.as_ref().and_then(|se| se(value))
    }

    fn decode(&self, data: &[u8]) -> Option<T> {
        self.deserializer.as_ref().and_then(|de| de(data))
    }

    async fn read_file_tier(&self, key: &str) -> Option<T> {
        let data = self.disk.get(key).await?;
        self.decode(&data)
    }
}
