//! Persistent on-disk tier
//!
//! One file per cache key under a namespace-scoped directory. File names are
//! the hex SHA-256 of the key, so arbitrary key strings map to stable,
//! collision-resistant filesystem names. Writes go to a unique temp file and
//! are renamed into place, so a concurrent reader observes either the old or
//! the new content, never a partial write. The directory is shared across
//! process instances using the same namespace; coordination happens only
//! through those atomic renames.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use crate::error::Result;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

pub(crate) struct DiskTier {
    root: PathBuf,
}

impl DiskTier {
    /// Open the tier rooted at `root`, creating the directory if needed
    pub async fn open(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem-safe name for a cache key
    fn entry_name(key: &str) -> String {
        hex::encode(Sha256::digest(key.as_bytes()))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(Self::entry_name(key))
    }

    /// Read the bytes for a key. Any read failure is a miss: a corrupt or
    /// half-deleted entry is indistinguishable from "not cached".
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match fs::read(self.entry_path(key)).await {
            Ok(data) => Some(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                debug!(key, error = %e, "file tier read failed, treating as miss");
                None
            }
        }
    }

    /// Write the bytes for a key atomically (temp file + rename)
    pub async fn set(&self, key: &str, data: &[u8]) -> Result<()> {
        let name = Self::entry_name(key);
        let tmp = self.root.join(format!(
            "{}.{}.{}.tmp",
            name,
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed),
        ));
        fs::write(&tmp, data).await?;
        if let Err(e) = fs::rename(&tmp, self.root.join(name)).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Remove the entry for a key; removing an absent entry is not an error
    pub async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the whole root recursively and recreate it empty
    pub async fn clear(&self) -> Result<()> {
        if let Err(e) = fs::remove_dir_all(&self.root).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(e.into());
            }
        }
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}
