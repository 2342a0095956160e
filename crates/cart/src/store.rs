//! The persistent cart store.
//!
//! A [`CartStore`] owns a single [`Cart`] behind an async mutex. Every mutation
//! runs read-modify-write-persist while holding the lock, so concurrent callers
//! never work from a stale snapshot and the persisted blob always reflects the
//! latest committed cart.
//!
//! Persistence failures during a mutation are logged and otherwise ignored; the
//! in-memory cart stays authoritative. Use [`CartStore::persist`] to retry a
//! write and observe its result.

use std::sync::Arc;

use gomarket_core::{Cart, CartItem, NewCartItem, ProductId};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::Result;
use crate::storage::{KeyValueStorage, StorageBackend};

/// Shared cart state mirrored to a key-value storage slot.
///
/// Cheaply cloneable via `Arc`; clones operate on the same cart. Pass a clone
/// to every component that needs the cart.
pub struct CartStore<S = StorageBackend> {
    inner: Arc<CartStoreInner<S>>,
}

struct CartStoreInner<S> {
    storage: S,
    key: String,
    cart: Mutex<Cart>,
}

impl<S> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store with an empty cart without reading storage.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self::with_cart(storage, key, Cart::new())
    }

    fn with_cart(storage: S, key: impl Into<String>, cart: Cart) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                key: key.into(),
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Create a store populated from the blob persisted under `key`.
    ///
    /// A missing, unreadable, or malformed blob yields an empty cart. No error
    /// is returned; read failures and malformed data are logged.
    #[instrument(skip_all, fields(key = tracing::field::Empty))]
    pub async fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        tracing::Span::current().record("key", key.as_str());

        let cart = match storage.get_item(&key).await {
            Ok(Some(blob)) => match serde_json::from_str::<Cart>(&blob) {
                Ok(cart) => {
                    tracing::debug!(items = cart.len(), "Loaded persisted cart");
                    cart
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed persisted cart");
                    Cart::new()
                }
            },
            Ok(None) => {
                tracing::debug!("No persisted cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
                Cart::new()
            }
        };

        Self::with_cart(storage, key, cart)
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Snapshot of the current line items in display order.
    pub async fn products(&self) -> Vec<CartItem> {
        self.inner.cart.lock().await.items().to_vec()
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.cart.lock().await.clone()
    }

    /// Sum of quantities across all lines.
    pub async fn total_quantity(&self) -> u64 {
        self.inner.cart.lock().await.total_quantity()
    }

    /// Add one unit of a product and persist.
    ///
    /// See [`Cart::add`]. Returns the updated line items.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add_to_cart(&self, item: NewCartItem) -> Vec<CartItem> {
        self.mutate(|cart| {
            cart.add(item);
            true
        })
        .await
    }

    /// Add one unit to an existing line and persist.
    ///
    /// Unknown IDs leave the cart unchanged. Returns the updated line items.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Vec<CartItem> {
        self.mutate(|cart| cart.increment(id)).await
    }

    /// Remove one unit from an existing line and persist.
    ///
    /// A line at quantity 1 is removed. Unknown IDs leave the cart unchanged.
    /// Returns the updated line items.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Vec<CartItem> {
        self.mutate(|cart| cart.decrement(id)).await
    }

    /// Write the current cart to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn persist(&self) -> Result<()> {
        let cart = self.inner.cart.lock().await;
        self.write(&cart).await
    }

    /// Empty the cart and remove its storage slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to remove the slot. The
    /// in-memory cart is emptied regardless.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn clear(&self) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;
        *cart = Cart::new();
        self.inner.storage.remove_item(&self.inner.key).await?;
        tracing::info!("Cart cleared");
        Ok(())
    }

    async fn mutate<F>(&self, op: F) -> Vec<CartItem>
    where
        F: FnOnce(&mut Cart) -> bool + Send,
    {
        let mut cart = self.inner.cart.lock().await;
        let found = op(&mut *cart);
        if !found {
            tracing::debug!("Product not in cart, nothing changed");
        }

        // The unchanged cart is still written so storage catches up after an
        // earlier failed write.
        if let Err(e) = self.write(&cart).await {
            tracing::error!(error = %e, key = %self.inner.key, "Failed to persist cart");
        }

        cart.items().to_vec()
    }

    async fn write(&self, cart: &Cart) -> Result<()> {
        let blob = serde_json::to_string(cart)?;
        self.inner.storage.set_item(&self.inner.key, &blob).await?;
        Ok(())
    }
}
