//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GOMARKET_STORAGE_DIR` - Directory for persisted data (default: `.gomarket`)
//! - `GOMARKET_CART_KEY` - Storage key for the cart (default: `@GoMarket:products`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::FileStorage;

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "@GoMarket:products";

/// Storage directory used unless configured otherwise.
pub const DEFAULT_STORAGE_DIR: &str = ".gomarket";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding persisted storage files
    pub storage_dir: PathBuf,
    /// Key of the storage slot holding the cart
    pub cart_key: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_CART_KEY.to_owned(),
            sentry_dsn: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_dir = PathBuf::from(get_env_or_default(
            "GOMARKET_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));
        let cart_key = get_env_or_default("GOMARKET_CART_KEY", DEFAULT_CART_KEY);
        validate_cart_key(&cart_key, "GOMARKET_CART_KEY")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            storage_dir,
            cart_key,
            sentry_dsn,
        })
    }

    /// Replace the cart storage key, applying the same validation as
    /// `GOMARKET_CART_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `key` is empty or blank.
    pub fn set_cart_key(&mut self, key: impl Into<String>) -> Result<(), ConfigError> {
        let key = key.into();
        validate_cart_key(&key, "GOMARKET_CART_KEY")?;
        self.cart_key = key;
        Ok(())
    }

    /// File storage rooted at the configured directory.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating an empty value as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a storage key is usable.
fn validate_cart_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}
