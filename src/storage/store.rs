use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{
    generate_code_id, CreateCodeRequest, ScanObservation, TrackedCode, UpdateCodeRequest,
};
use crate::storage::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tracked code not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository over the persistence gateway.
///
/// Every mutation is a load-modify-save sequence against the full persisted
/// set, serialized behind a single mutex so concurrent scans on the same code
/// never lose an increment. Reads go straight to the gateway.
pub struct CodeStore {
    backend: Arc<dyn Storage>,
    write_lock: Mutex<()>,
}

impl CodeStore {
    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        self.backend.init().await
    }

    pub async fn list(&self) -> StoreResult<Vec<TrackedCode>> {
        Ok(self.backend.load_all().await?)
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<TrackedCode>> {
        let codes = self.backend.load_all().await?;
        Ok(codes.into_iter().find(|c| c.id == id))
    }

    /// Create a new tracked code. Validation happens before any persistence
    /// call so a rejected request never leaves partial state.
    pub async fn create(
        &self,
        request: CreateCodeRequest,
        public_base_url: &str,
    ) -> StoreResult<TrackedCode> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("name cannot be empty".to_string()));
        }

        let target_url = request.target_url.trim();
        if target_url.is_empty() {
            return Err(StoreError::Validation(
                "target URL cannot be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut codes = self.backend.load_all().await?;

        // Regenerate on the off chance a random id is already taken.
        let mut id = generate_code_id();
        while codes.iter().any(|c| c.id == id) {
            id = generate_code_id();
        }

        let tracking_url = format!("{}/track/{}", public_base_url, id);
        let code = TrackedCode::new(
            id,
            name.to_string(),
            target_url.to_string(),
            tracking_url,
            Utc::now(),
        );

        codes.push(code.clone());
        self.backend.save_all(&codes).await?;

        Ok(code)
    }

    /// Permissive owner-side update of name and/or target URL.
    pub async fn update(&self, id: &str, request: UpdateCodeRequest) -> StoreResult<TrackedCode> {
        let _guard = self.write_lock.lock().await;
        let mut codes = self.backend.load_all().await?;

        let code = codes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(StoreError::Validation("name cannot be empty".to_string()));
            }
            code.name = name;
        }

        if let Some(target_url) = request.target_url {
            let target_url = target_url.trim().to_string();
            if target_url.is_empty() {
                return Err(StoreError::Validation(
                    "target URL cannot be empty".to_string(),
                ));
            }
            code.target_url = target_url;
        }

        let updated = code.clone();
        self.backend.save_all(&codes).await?;

        Ok(updated)
    }

    /// Remove a code and its whole scan history. Other codes are untouched.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut codes = self.backend.load_all().await?;

        let before = codes.len();
        codes.retain(|c| c.id != id);
        if codes.len() == before {
            return Ok(false);
        }

        self.backend.save_all(&codes).await?;
        Ok(true)
    }

    /// Append a scan to `id` and persist the updated record.
    ///
    /// The whole read-modify-write runs under the store lock, so two
    /// near-simultaneous scans of the same code both land. The save completes
    /// before the updated record is returned; a write failure is never
    /// reported as success.
    pub async fn record_scan(
        &self,
        id: &str,
        observation: ScanObservation,
    ) -> StoreResult<TrackedCode> {
        let _guard = self.write_lock.lock().await;
        let mut codes = self.backend.load_all().await?;

        let code = codes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;

        code.record_scan(observation);
        let updated = code.clone();

        self.backend.save_all(&codes).await?;

        Ok(updated)
    }
}
