pub mod error;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, StorageBackend};

pub use error::StoreError;
pub use manager::DatabaseManager;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::SchoolStore;

/// Opens the store selected by `config.storage.backend`
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn SchoolStore>, StoreError> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let store = PgStore::connect(&config.database).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!(
                "Using in-memory store with {} seeded tenant(s)",
                config.storage.memory_tenants.len()
            );
            let store = MemoryStore::with_tenants(config.storage.memory_tenants.iter().cloned());
            Ok(Arc::new(store))
        }
    }
}
