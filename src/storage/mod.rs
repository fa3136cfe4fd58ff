mod factory;
mod file;
mod memory;

pub use factory::StorageFactory;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::RecipeError;

/// Unified trait for key-value persistence backends
///
/// Mirrors the device storage API the mobile shell exposes: string values
/// addressed by string keys, with a missing key reading as `None`.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Get the backend name (e.g., "file", "memory")
    fn backend_name(&self) -> &str;

    /// Read the value stored under `key`
    async fn get_item(&self, key: &str) -> Result<Option<String>, RecipeError>;

    /// Replace the value stored under `key`. Readers never observe a partial write.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), RecipeError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), RecipeError>;
}

/// Reject keys that cannot be used as a slot name on every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), RecipeError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(RecipeError::InvalidStorageKey(key.to_string()))
    }
}
