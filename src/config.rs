use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Where and how the recipe collection is persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Which key-value backend holds the recipe collection
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key inside `dir`
    #[default]
    File,
    /// Process memory only, lost on exit
    Memory,
}

/// Configuration for the storage slot
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory used by the file backend
    #[serde(default = "default_storage_dir")]
    pub dir: String,
    /// Key under which the whole collection is stored
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

// Default value functions
fn default_storage_dir() -> String {
    "data".to_string()
}

pub(crate) fn default_storage_key() -> String {
    "recipes".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOOK__ prefix
    /// 2. recipe-book.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOOK__STORAGE__DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-book").required(false))
        // Use double underscore for nested: RECIPE_BOOK__STORAGE__KEY
        .add_source(
            Environment::with_prefix("RECIPE_BOOK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
