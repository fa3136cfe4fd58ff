//! The recipe collection persisted as one JSON array under a single key.
//!
//! Every mutation reloads the full collection, changes it, and writes it back.
//! That is not atomic across concurrent callers; the app only ever has one
//! writer at a time.

use log::{debug, error, warn};
use std::sync::Arc;

use crate::model::{Recipe, RecipeId};
use crate::storage::KeyValueStorage;
use crate::RecipeError;

#[derive(Clone)]
pub struct RecipeStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl RecipeStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key holding the collection
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load every stored recipe, in insertion order
    ///
    /// A missing slot is an empty collection. A slot that is not a JSON array
    /// of recipes is reported as `StorageCorrupt` instead of being discarded.
    pub async fn load_all(&self) -> Result<Vec<Recipe>, RecipeError> {
        let Some(raw) = self.storage.get_item(&self.key).await? else {
            debug!("No recipes stored under '{}'", self.key);
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(recipes) => {
                debug!("Loaded {} recipes from '{}'", recipes.len(), self.key);
                Ok(recipes)
            }
            Err(source) => {
                error!("Stored recipes under '{}' are corrupt: {}", self.key, source);
                Err(RecipeError::StorageCorrupt {
                    key: self.key.clone(),
                    source,
                })
            }
        }
    }

    /// Overwrite the stored collection with `recipes`
    pub async fn save_all(&self, recipes: &[Recipe]) -> Result<(), RecipeError> {
        let json = serde_json::to_string(recipes)?;
        self.storage.set_item(&self.key, &json).await?;
        debug!("Saved {} recipes to '{}'", recipes.len(), self.key);
        Ok(())
    }

    /// Append one recipe at the end of the collection
    ///
    /// Ids are unique within the collection: a recipe whose id is already
    /// stored is rejected with `DuplicateId` and nothing is written.
    pub async fn append(&self, recipe: Recipe) -> Result<(), RecipeError> {
        let mut recipes = self.load_all().await?;
        if recipes.iter().any(|r| r.id == recipe.id) {
            warn!("Recipe {} already stored under '{}'", recipe.id, self.key);
            return Err(RecipeError::DuplicateId(recipe.id));
        }
        recipes.push(recipe);
        self.save_all(&recipes).await
    }

    /// Remove the recipe with `id`. Returns `false` (and writes nothing) when
    /// no recipe matched.
    pub async fn delete_by_id(&self, id: RecipeId) -> Result<bool, RecipeError> {
        let mut recipes = self.load_all().await?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);

        if recipes.len() == before {
            debug!("Recipe {} not present in '{}', nothing to delete", id, self.key);
            return Ok(false);
        }

        self.save_all(&recipes).await?;
        Ok(true)
    }

    pub async fn find(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeError> {
        Ok(self.load_all().await?.into_iter().find(|r| r.id == id))
    }

    pub async fn contains(&self, id: RecipeId) -> Result<bool, RecipeError> {
        Ok(self.load_all().await?.iter().any(|r| r.id == id))
    }
}
