//! Key-value storage backends for the persisted cart.
//!
//! The cart is stored as a single JSON string under one key. Backends only need
//! to get, set, and remove whole string values.
//!
//! - [`FileStorage`] - One file per key on local disk
//! - [`MemoryStorage`] - In-process map, for tests and ephemeral carts
//! - [`StorageBackend`] - Runtime choice between the two

use std::future::Future;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An async string key-value store.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Storage selected at runtime.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl From<FileStorage> for StorageBackend {
    fn from(storage: FileStorage) -> Self {
        Self::File(storage)
    }
}

impl From<MemoryStorage> for StorageBackend {
    fn from(storage: MemoryStorage) -> Self {
        Self::Memory(storage)
    }
}

impl KeyValueStorage for StorageBackend {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::File(storage) => storage.get_item(key).await,
            Self::Memory(storage) => storage.get_item(key).await,
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(storage) => storage.set_item(key, value).await,
            Self::Memory(storage) => storage.set_item(key, value).await,
        }
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::File(storage) => storage.remove_item(key).await,
            Self::Memory(storage) => storage.remove_item(key).await,
        }
    }
}
