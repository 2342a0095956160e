//! Error types for the cart store.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by [`crate::CartStore`] and [`crate::scope`].
///
/// Mutations never return these for persistence failures; those are logged.
/// Only explicit calls such as [`crate::CartStore::persist`] report them.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The cart was requested outside a provided scope.
    #[error("use_cart must be used within a cart provider")]
    NoProvider,
}

/// Result type alias for `CartStoreError`.
pub type Result<T> = std::result::Result<T, CartStoreError>;
