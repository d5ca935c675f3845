use crate::models::TrackedCode;
use crate::storage::{Storage, StorageResult};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory gateway for ephemeral runs and tests. Same wholesale
/// load/save contract as the SQLite backend, minus the serialization.
pub struct MemoryStorage {
    codes: RwLock<Vec<TrackedCode>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            codes: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn load_all(&self) -> StorageResult<Vec<TrackedCode>> {
        Ok(self.codes.read().await.clone())
    }

    async fn save_all(&self, codes: &[TrackedCode]) -> StorageResult<()> {
        *self.codes.write().await = codes.to_vec();
        Ok(())
    }
}
