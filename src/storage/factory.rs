use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub struct StorageFactory;

impl StorageFactory {
    /// Create a storage backend from configuration
    pub fn create(config: &StorageConfig) -> Arc<dyn KeyValueStorage> {
        match config.backend {
            StorageBackend::File => Arc::new(FileStorage::new(&config.dir)),
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        }
    }

    /// List all available backend names
    pub fn available_backends() -> Vec<&'static str> {
        vec!["file", "memory"]
    }
}
