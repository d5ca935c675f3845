use crate::models::TrackedCode;
use crate::storage::{Storage, StorageError, StorageResult};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Well-known key the full tracked-code array is stored under.
const STORAGE_KEY: &str = "qr_codes_data";

/// SQLite-backed gateway. The entire code list lives as one JSON blob in a
/// key-value table; load/save operate on the whole set.
pub struct SqliteStorage {
    pool: Arc<SqlitePool>,
}

impl SqliteStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn load_all(&self) -> StorageResult<Vec<TrackedCode>> {
        let blob = sqlx::query_scalar::<_, String>(
            r#"
            SELECT value FROM kv_store
            WHERE key = ?
            "#,
        )
        .bind(STORAGE_KEY)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| StorageError::Read(e.into()))?;

        match blob {
            Some(json) => {
                let codes: Vec<TrackedCode> =
                    serde_json::from_str(&json).map_err(|e| StorageError::Read(e.into()))?;
                Ok(codes)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, codes: &[TrackedCode]) -> StorageResult<()> {
        let json = serde_json::to_string(codes).map_err(|e| StorageError::Write(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(STORAGE_KEY)
        .bind(json)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| StorageError::Write(e.into()))?;

        Ok(())
    }
}
