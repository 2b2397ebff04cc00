//! Generic two-tier object cache
//!
//! A fast volatile in-memory tier backed by a slower persistent file tier,
//! with an optional fallback to a caller-supplied downloader when both tiers
//! miss. Lookups walk the tiers in order (memory, file, downloader) and
//! promote every hit into the tiers above it, so repeated lookups for the
//! same key get cheaper while the file tier keeps entries across process
//! restarts.
//!
//! The cache is generic over an opaque value type; persistence and the
//! downloader path go through caller-supplied serializer/deserializer
//! closures, so any value with a byte representation can be cached.
//!
//! # Example
//!
//! ```no_run
//! use tiered_object_cache::{HitStatus, ObjectCache};
//!
//! # async fn example() -> Result<(), tiered_object_cache::CacheError> {
//! let mut cache: ObjectCache<String> = ObjectCache::new("thumbnails").await?;
//! cache.set_serializer(|v: &String| Some(v.as_bytes().to_vec()));
//! cache.set_deserializer(|data| String::from_utf8(data.to_vec()).ok());
//! cache.set_downloader(|key| async move {
//!     // fetch the bytes for `key` from the network
//!     let _ = key;
//!     None::<Vec<u8>>
//! });
//!
//! match cache.find("img-1").await {
//!     Some((value, HitStatus::Memory)) => println!("hot: {value}"),
//!     Some((value, _)) => println!("warmed up: {value}"),
//!     None => println!("not available"),
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod disk;
mod error;
mod memory;
mod types;

pub use cache::ObjectCache;
pub use error::{CacheError, Result};
pub use types::{CacheStats, Deserializer, Downloader, HitStatus, Serializer};
