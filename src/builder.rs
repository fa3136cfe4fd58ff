use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{default_storage_key, AppConfig};
use crate::flows::{CreatorFlow, ViewerFlow};
use crate::storage::{
    validate_key, FileStorage, KeyValueStorage, MemoryStorage, StorageFactory,
};
use crate::store::RecipeStore;
use crate::RecipeError;

/// Where the recipe collection should live
#[derive(Clone)]
enum StorageSource {
    /// JSON files inside a directory
    Directory(PathBuf),
    /// Process memory only
    Memory,
    /// Caller-provided backend
    Custom(Arc<dyn KeyValueStorage>),
    /// Whatever the loaded configuration says
    Config(AppConfig),
}

/// Builder for configuring a [`RecipeBook`]
#[derive(Default)]
pub struct RecipeBookBuilder {
    source: Option<StorageSource>,
    key: Option<String>,
}

impl RecipeBookBuilder {
    /// Persist recipes as JSON files inside `dir`
    ///
    /// # Example
    /// ```
    /// use recipe_book::RecipeBook;
    ///
    /// let book = RecipeBook::builder()
    ///     .storage_dir("data")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(book.store().key(), "recipes");
    /// ```
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source = Some(StorageSource::Directory(dir.into()));
        self
    }

    /// Keep recipes in memory only
    pub fn in_memory(mut self) -> Self {
        self.source = Some(StorageSource::Memory);
        self
    }

    /// Use a custom storage backend
    pub fn storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.source = Some(StorageSource::Custom(storage));
        self
    }

    /// Take backend, directory and key from a loaded configuration
    ///
    /// An explicit [`key`](Self::key) still wins over the configured one.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.source = Some(StorageSource::Config(config));
        self
    }

    /// Set the storage key holding the collection (default `recipes`)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Build the recipe book
    ///
    /// # Errors
    /// Returns `BuilderError` when no storage was chosen, and
    /// `InvalidStorageKey` when the key cannot name a storage slot.
    pub fn build(self) -> Result<RecipeBook, RecipeError> {
        let source = self.source.ok_or_else(|| {
            RecipeError::BuilderError(
                "No storage specified. Use .storage_dir(), .in_memory() or .config()"
                    .to_string(),
            )
        })?;

        let configured_key = match &source {
            StorageSource::Config(config) => Some(config.storage.key.clone()),
            _ => None,
        };

        let storage: Arc<dyn KeyValueStorage> = match source {
            StorageSource::Directory(dir) => Arc::new(FileStorage::new(dir)),
            StorageSource::Memory => Arc::new(MemoryStorage::new()),
            StorageSource::Custom(storage) => storage,
            StorageSource::Config(config) => StorageFactory::create(&config.storage),
        };

        let key = self
            .key
            .or(configured_key)
            .unwrap_or_else(default_storage_key);
        validate_key(&key)?;

        debug!(
            "Recipe book using {} storage, key '{}'",
            storage.backend_name(),
            key
        );

        Ok(RecipeBook {
            store: RecipeStore::new(storage, key),
        })
    }
}

/// Entry point tying the store to the create and view screens
#[derive(Clone)]
pub struct RecipeBook {
    store: RecipeStore,
}

impl RecipeBook {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_book::RecipeBook;
    ///
    /// let builder = RecipeBook::builder();
    /// ```
    pub fn builder() -> RecipeBookBuilder {
        RecipeBookBuilder::default()
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Start a new recipe draft
    pub fn creator(&self) -> CreatorFlow {
        CreatorFlow::new(self.store.clone())
    }

    /// Open the saved-recipes view
    pub fn viewer(&self) -> ViewerFlow {
        ViewerFlow::new(self.store.clone())
    }
}
