//! Create, store and share cooking recipes made of named components.
//!
//! The whole collection lives under one key of a key-value storage backend as
//! a JSON array. Single recipes travel between devices as short share codes
//! produced by [`codec::encode`].

pub mod builder;
pub mod codec;
pub mod config;
pub mod error;
pub mod flows;
pub mod model;
pub mod storage;
pub mod store;
pub mod uniffi_bindings;

pub use builder::{RecipeBook, RecipeBookBuilder};
pub use codec::{decode as decode_recipe, encode as encode_recipe};
pub use config::AppConfig;
pub use error::RecipeError;
pub use flows::{ComponentKey, CreatorFlow, CreatorPhase, DraftAction, IngredientKey, ViewerFlow};
pub use model::{Component, Recipe, RecipeId};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::RecipeStore;
