//! UniFFI bindings for recipe-book
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.
//! Every call names the storage directory explicitly, so the host app decides
//! where the collection lives (usually its documents directory).

use std::fmt;

use crate::codec;
use crate::model::new_recipe_id;
use crate::{Component, Recipe, RecipeBook, RecipeError};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe structure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: i64,
    pub name: String,
    pub components: Vec<FfiComponent>,
}

/// FFI-compatible component structure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiComponent {
    pub name: String,
    pub ingredients: Vec<String>,
    /// Preparation text
    pub preparare: String,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            id: recipe.id,
            name: recipe.name,
            components: recipe.components.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe::new(
            ffi.id,
            ffi.name,
            ffi.components.into_iter().map(Into::into).collect(),
        )
    }
}

impl From<Component> for FfiComponent {
    fn from(component: Component) -> Self {
        FfiComponent {
            name: component.name,
            ingredients: component.ingredients,
            preparare: component.preparare,
        }
    }
}

impl From<FfiComponent> for Component {
    fn from(ffi: FfiComponent) -> Self {
        Component {
            name: ffi.name,
            ingredients: ffi.ingredients,
            preparare: ffi.preparare,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// Stored collection could not be read as recipes
    StorageCorrupt { message: String },
    /// Reading or writing storage failed
    StorageError { message: String },
    /// Share code is invalid or corrupt
    InvalidCode { message: String },
    /// A recipe with the same id already exists
    DuplicateId { message: String },
    /// No recipe with that id
    NotFound { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::StorageCorrupt { message } => {
                write!(f, "Storage corrupt: {}", message)
            }
            FfiRecipeError::StorageError { message } => write!(f, "Storage error: {}", message),
            FfiRecipeError::InvalidCode { message } => write!(f, "Invalid code: {}", message),
            FfiRecipeError::DuplicateId { message } => write!(f, "Duplicate id: {}", message),
            FfiRecipeError::NotFound { message } => write!(f, "Not found: {}", message),
            FfiRecipeError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiRecipeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<RecipeError> for FfiRecipeError {
    fn from(err: RecipeError) -> Self {
        let message = err.to_string();
        match err {
            RecipeError::StorageCorrupt { .. } => FfiRecipeError::StorageCorrupt { message },
            RecipeError::Storage(_) | RecipeError::Serialization(_) => {
                FfiRecipeError::StorageError { message }
            }
            RecipeError::InvalidToken(_) => FfiRecipeError::InvalidCode { message },
            RecipeError::DuplicateId(_) => FfiRecipeError::DuplicateId { message },
            RecipeError::NotFound(_) => FfiRecipeError::NotFound { message },
            RecipeError::InvalidStorageKey(_)
            | RecipeError::UnknownDraftItem(_)
            | RecipeError::AlreadySaved(_)
            | RecipeError::BuilderError(_) => FfiRecipeError::InvalidInput { message },
            RecipeError::ConfigError(_) => FfiRecipeError::ConfigError { message },
            RecipeError::Clock(_) => FfiRecipeError::RuntimeError { message },
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn open_book(storage_dir: String) -> Result<RecipeBook, FfiRecipeError> {
    Ok(RecipeBook::builder().storage_dir(storage_dir).build()?)
}

/// List every saved recipe in insertion order
///
/// # Arguments
/// * `storage_dir` - Directory holding the recipe collection
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn list_recipes(storage_dir: String) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let book = open_book(storage_dir)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let mut viewer = book.viewer();
        let recipes = viewer.list().await?;
        Ok(recipes.iter().cloned().map(Into::into).collect())
    })
}

/// Append a finished recipe to the collection
///
/// The mobile form builds the recipe itself; pass `id` as 0 to have one
/// assigned from the current time.
///
/// # Returns
/// The stored recipe, with its final id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn save_recipe(storage_dir: String, recipe: FfiRecipe) -> Result<FfiRecipe, FfiRecipeError> {
    let book = open_book(storage_dir)?;
    let mut recipe: Recipe = recipe.into();
    if recipe.id == 0 {
        recipe.id = new_recipe_id()?;
    }

    let rt = create_runtime()?;
    rt.block_on(async {
        book.store().append(recipe.clone()).await?;
        Ok(recipe.into())
    })
}

/// Delete a recipe by id
///
/// # Returns
/// `true` if a recipe was removed, `false` if none had that id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn delete_recipe(storage_dir: String, id: i64) -> Result<bool, FfiRecipeError> {
    let book = open_book(storage_dir)?;
    let rt = create_runtime()?;
    rt.block_on(async { Ok(book.viewer().delete(id).await?) })
}

/// Produce the share code for a stored recipe, ready for the clipboard
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn export_recipe(storage_dir: String, id: i64) -> Result<String, FfiRecipeError> {
    let book = open_book(storage_dir)?;
    let rt = create_runtime()?;
    rt.block_on(async { Ok(book.viewer().export(id).await?) })
}

/// Import a pasted share code into the collection
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn import_recipe(storage_dir: String, code: String) -> Result<FfiRecipe, FfiRecipeError> {
    let book = open_book(storage_dir)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipe = book.viewer().import(&code).await?;
        Ok(recipe.into())
    })
}

/// Encode a recipe as a share code without touching storage
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn encode_recipe(recipe: FfiRecipe) -> Result<String, FfiRecipeError> {
    Ok(codec::encode(&recipe.into())?)
}

/// Decode a share code without touching storage
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn decode_recipe(code: String) -> Result<FfiRecipe, FfiRecipeError> {
    Ok(codec::decode(&code)?.into())
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
