use aerodesk_catalog::CatalogOptions;
use aerodesk_core::KeyValueStore;
use tracing::info;

use crate::app_config::{Config, StorageBackend, StorageConfig};
use crate::file_store::JsonFileStore;
use crate::memory_store::MemoryStore;
use crate::seed;

/// Build the configured storage backend.
pub fn open_store(config: &StorageConfig) -> Box<dyn KeyValueStore> {
    match config.backend {
        StorageBackend::File => {
            let store = JsonFileStore::new(&config.path);
            info!(path = %store.path().display(), quota = ?config.quota_bytes, "Using file storage");
            match config.quota_bytes {
                Some(quota) => Box::new(store.with_quota(quota)),
                None => Box::new(store),
            }
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, nothing will be kept");
            Box::new(MemoryStore::new())
        }
    }
}

/// Catalog options for the configured key and seed.
pub fn catalog_options(config: &Config) -> CatalogOptions {
    CatalogOptions {
        storage_key: config.storage.key.clone(),
        seed: seed::load_seed(&config.catalog.seed_source()),
    }
}
