//! Integration tests for GoMarket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gomarket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against file storage across reloads
//! - `cart_concurrency` - Many tasks mutating one store
//!
//! Shared fixtures live in this crate so each test file stays focused.

use gomarket_core::{NewCartItem, ProductId};
use rust_decimal::Decimal;

/// Build a product to add to a cart.
#[must_use]
pub fn product(id: &str, title: &str, price_cents: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::from(id),
        title: title.to_owned(),
        image_url: format!("https://cdn.gomarket.test/{id}.png"),
        price: Decimal::new(price_cents, 2),
    }
}
