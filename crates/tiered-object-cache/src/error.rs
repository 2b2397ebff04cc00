//! Error types for the tiered object cache

use std::fmt;

/// Errors that can occur when constructing a cache or writing to its file tier
#[derive(Debug)]
pub enum CacheError {
    /// Filesystem operation on the persistent tier failed
    Io(std::io::Error),
    /// Namespace is empty or contains path separators
    InvalidNamespace(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Cache I/O error: {}", e),
            Self::InvalidNamespace(ns) => write!(f, "Invalid cache namespace: {:?}", ns),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidNamespace(_) => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
