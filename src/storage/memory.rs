use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{validate_key, KeyValueStorage};
use crate::RecipeError;

/// Storage that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, RecipeError> {
        validate_key(key)?;
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), RecipeError> {
        validate_key(key)?;
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), RecipeError> {
        validate_key(key)?;
        self.items.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("recipes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let storage = MemoryStorage::new();
        storage.set_item("recipes", "[]").await.unwrap();
        assert_eq!(
            storage.get_item("recipes").await.unwrap().as_deref(),
            Some("[]")
        );

        storage.remove_item("recipes").await.unwrap();
        storage.remove_item("recipes").await.unwrap();
        assert_eq!(storage.get_item("recipes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_key() {
        let storage = MemoryStorage::new();
        let result = storage.set_item("a/b", "[]").await;
        assert!(matches!(result, Err(RecipeError::InvalidStorageKey(_))));
    }
}
