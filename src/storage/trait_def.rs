use crate::models::TrackedCode;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read persisted codes: {0}")]
    Read(#[source] anyhow::Error),
    #[error("failed to write persisted codes: {0}")]
    Write(#[source] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence gateway for the tracked-code set.
///
/// The whole collection is read and replaced wholesale on every call. Callers
/// never cache a working copy across calls; the gateway is the sole source of
/// truth. Backends must round-trip every field (timestamps included) and
/// preserve the insertion order of each code's scans.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initialize the storage (create tables, etc.)
    async fn init(&self) -> Result<()>;

    /// Load every persisted tracked code. An empty store yields an empty list.
    async fn load_all(&self) -> StorageResult<Vec<TrackedCode>>;

    /// Replace the full persisted set with `codes`.
    async fn save_all(&self, codes: &[TrackedCode]) -> StorageResult<()>;
}
