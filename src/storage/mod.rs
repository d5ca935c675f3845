mod memory;
mod sqlite;
mod store;
mod trait_def;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use store::{CodeStore, StoreError, StoreResult};
pub use trait_def::{Storage, StorageError, StorageResult};
