//! Public cache types

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Which stage of the fallback chain satisfied a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitStatus {
    /// Served from the in-memory tier
    Memory,
    /// Served from the on-disk tier
    File,
    /// Fetched by the configured downloader
    Downloader,
}

/// Counters for a cache instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries currently resident in the memory tier
    pub entries: u64,
    /// Lookups satisfied by any stage
    pub hits: u64,
    /// Lookups that missed all three stages
    pub misses: u64,
}

/// Asynchronous provider of raw bytes for keys missing from both tiers.
///
/// Returning `None` means the key could not be fetched; the lookup then
/// resolves as a miss.
pub type Downloader = Arc<dyn Fn(String) -> BoxFuture<'static, Option<Vec<u8>>> + Send + Sync>;

/// Encodes a value into the bytes persisted by the file tier
pub type Serializer<T> = Arc<dyn Fn(&T) -> Option<Vec<u8>> + Send + Sync>;

/// Decodes persisted or downloaded bytes back into a value
pub type Deserializer<T> = Arc<dyn Fn(&[u8]) -> Option<T> + Send + Sync>;
