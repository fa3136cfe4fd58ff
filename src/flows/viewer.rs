use log::{info, warn};

use crate::codec;
use crate::model::{Recipe, RecipeId};
use crate::store::RecipeStore;
use crate::RecipeError;

/// The saved-recipes screen: list, delete, share and import by code
///
/// Keeps the last loaded list for display. Every operation reloads from the
/// store before acting, so the cache is never the source of truth.
pub struct ViewerFlow {
    store: RecipeStore,
    recipes: Vec<Recipe>,
}

impl ViewerFlow {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store,
            recipes: Vec::new(),
        }
    }

    /// Recipes as of the last refresh
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Reload the collection and return it
    pub async fn list(&mut self) -> Result<&[Recipe], RecipeError> {
        self.recipes = self.store.load_all().await?;
        Ok(&self.recipes)
    }

    /// Delete a recipe by id. Returns whether anything was removed.
    pub async fn delete(&mut self, id: RecipeId) -> Result<bool, RecipeError> {
        let removed = self.store.delete_by_id(id).await?;
        if removed {
            info!("Deleted recipe {}", id);
        }
        self.list().await?;
        Ok(removed)
    }

    /// Produce the share code for a stored recipe
    pub async fn export(&self, id: RecipeId) -> Result<String, RecipeError> {
        let recipe = self
            .store
            .find(id)
            .await?
            .ok_or(RecipeError::NotFound(id))?;
        codec::encode(&recipe)
    }

    /// Import a recipe from a share code
    ///
    /// Rejects codes that do not decode and recipes whose id is already
    /// stored; neither case touches the store.
    pub async fn import(&mut self, token: &str) -> Result<Recipe, RecipeError> {
        let recipe = match codec::decode(token) {
            Ok(recipe) => recipe,
            Err(e) => {
                warn!("Rejected share code: {}", e);
                return Err(e);
            }
        };

        let mut current = self.store.load_all().await?;
        if current.iter().any(|r| r.id == recipe.id) {
            warn!("Recipe {} already exists, import skipped", recipe.id);
            return Err(RecipeError::DuplicateId(recipe.id));
        }

        current.push(recipe.clone());
        self.store.save_all(&current).await?;
        info!("Imported recipe {} '{}'", recipe.id, recipe.name);

        self.recipes = current;
        Ok(recipe)
    }
}
