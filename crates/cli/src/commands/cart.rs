//! Cart inspection and editing commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the persisted cart as JSON
//! gm-cli cart show
//!
//! # Add one unit of a product
//! gm-cli cart add --id 1 --title "Coffee" --image-url https://cdn.example.com/1.png --price 19.99
//!
//! # Change quantities
//! gm-cli cart increment 1
//! gm-cli cart decrement 1
//!
//! # Remove the persisted cart entirely
//! gm-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `GOMARKET_STORAGE_DIR` - Directory holding the cart file
//! - `GOMARKET_CART_KEY` - Storage key of the cart

use gomarket_cart::{CartConfig, CartStore, CartStoreError, StorageBackend};
use gomarket_core::{CartItem, NewCartItem, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Cart store operation failed.
    #[error("Cart store error: {0}")]
    Store(#[from] CartStoreError),

    /// Rendering the cart failed.
    #[error("Failed to render cart: {0}")]
    Render(#[from] serde_json::Error),

    /// Price must not be negative.
    #[error("Invalid price: {0}. Price must not be negative")]
    NegativePrice(Decimal),
}

/// Open the file-backed cart described by `config`.
pub async fn open(config: &CartConfig) -> CartStore {
    tracing::debug!(
        dir = %config.storage_dir.display(),
        key = %config.cart_key,
        "Opening cart storage"
    );
    CartStore::load(
        StorageBackend::from(config.file_storage()),
        config.cart_key.clone(),
    )
    .await
}

/// Render the current cart.
pub async fn show(store: &CartStore) -> Result<String, CartCommandError> {
    let cart = store.cart().await;
    tracing::info!(
        lines = cart.len(),
        total_quantity = cart.total_quantity(),
        "Cart loaded"
    );
    render(cart.items())
}

/// Add one unit of a product and render the result.
pub async fn add(
    store: &CartStore,
    id: &str,
    title: &str,
    image_url: &str,
    price: Decimal,
) -> Result<String, CartCommandError> {
    if price < Decimal::ZERO {
        return Err(CartCommandError::NegativePrice(price));
    }

    let item = NewCartItem {
        id: ProductId::from(id),
        title: title.to_owned(),
        image_url: image_url.to_owned(),
        price,
    };

    tracing::info!("Adding {} to cart", item.id);
    let products = store.add_to_cart(item).await;
    store.persist().await?;
    render(&products)
}

/// Add one unit to an existing line and render the result.
pub async fn increment(store: &CartStore, id: &str) -> Result<String, CartCommandError> {
    let products = store.increment(&ProductId::from(id)).await;
    store.persist().await?;
    render(&products)
}

/// Remove one unit from an existing line and render the result.
pub async fn decrement(store: &CartStore, id: &str) -> Result<String, CartCommandError> {
    let products = store.decrement(&ProductId::from(id)).await;
    store.persist().await?;
    render(&products)
}

/// Empty the cart and delete its storage slot.
pub async fn clear(store: &CartStore) -> Result<(), CartCommandError> {
    store.clear().await?;
    Ok(())
}

fn render(items: &[CartItem]) -> Result<String, CartCommandError> {
    Ok(serde_json::to_string_pretty(items)?)
}
