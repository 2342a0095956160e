//! Provider/consumer access to a cart store.
//!
//! Prefer passing a [`CartStore`] clone explicitly. This module exists for call
//! sites deep inside a task that cannot thread the store through: wrap the task
//! in [`provide`] and call [`use_cart`] where the store is needed.
//!
//! ```
//! use gomarket_cart::{CartStore, MemoryStorage, StorageBackend, scope};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store: CartStore = CartStore::new(StorageBackend::from(MemoryStorage::new()), "cart");
//!
//! scope::provide(store, async {
//!     let cart = scope::use_cart().expect("inside provider");
//!     assert!(cart.products().await.is_empty());
//! })
//! .await;
//!
//! assert!(scope::use_cart().is_err());
//! # }
//! ```

use std::future::Future;

use crate::error::{CartStoreError, Result};
use crate::store::CartStore;

tokio::task_local! {
    static CURRENT_CART: CartStore;
}

/// Run `fut` with `store` available through [`use_cart`].
pub async fn provide<F: Future>(store: CartStore, fut: F) -> F::Output {
    CURRENT_CART.scope(store, fut).await
}

/// The store installed by the enclosing [`provide`] call.
///
/// # Errors
///
/// Returns [`CartStoreError::NoProvider`] when called outside [`provide`].
pub fn use_cart() -> Result<CartStore> {
    CURRENT_CART
        .try_with(CartStore::clone)
        .map_err(|_| CartStoreError::NoProvider)
}
