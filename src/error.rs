use thiserror::Error;

use crate::model::RecipeId;

/// Errors that can occur while storing, editing or sharing recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The persisted collection could not be parsed as a list of recipes
    #[error("Stored recipes under '{key}' are corrupt: {source}")]
    StorageCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the storage backend failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Storage key contains characters the backend cannot map to a slot
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    /// Share code could not be decoded into a recipe
    #[error("Invalid or corrupt recipe code: {0}")]
    InvalidToken(String),

    /// Saved or imported recipe has an id that already exists in the collection
    #[error("A recipe with id {0} already exists")]
    DuplicateId(RecipeId),

    /// No stored recipe has the requested id
    #[error("Recipe {0} not found")]
    NotFound(RecipeId),

    /// A draft action referenced a component or ingredient that does not exist
    #[error("Unknown draft item: {0}")]
    UnknownDraftItem(String),

    /// The draft was already committed to storage
    #[error("Recipe {0} was already saved")]
    AlreadySaved(RecipeId),

    /// The system clock cannot produce a recipe id
    #[error("System clock error: {0}")]
    Clock(String),

    /// Failed to serialize a recipe
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
