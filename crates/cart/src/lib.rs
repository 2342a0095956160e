//! GoMarket Cart - Persistent shopping cart store.
//!
//! The [`CartStore`] keeps a [`gomarket_core::Cart`] in memory and mirrors it
//! to a single key-value storage slot after every mutation, so the cart
//! survives restarts.
//!
//! # Modules
//!
//! - [`store`] - The cart store and its operations
//! - [`storage`] - Key-value storage backends (file, memory)
//! - [`scope`] - Task-local provider/consumer access to a store
//! - [`config`] - Environment-based configuration
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod scope;
pub mod storage;
pub mod store;

pub use config::CartConfig;
pub use error::CartStoreError;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageBackend, StorageError};
pub use store::CartStore;
