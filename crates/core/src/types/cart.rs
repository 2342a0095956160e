//! Cart line items and the cart itself.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s keyed by [`ProductId`].
//! Insertion order is display order.
//!
//! ## Invariants
//!
//! - Every item has a quantity of at least 1
//! - An item whose quantity would reach 0 is removed
//! - Product IDs are unique within a cart
//!
//! The invariants are enforced on every mutation and when a cart is
//! deserialized, so a `Cart` value is always well-formed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::id::ProductId;

/// Errors raised when a list of items does not form a valid cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The same product appears on more than one line.
    #[error("duplicate cart item: {0}")]
    DuplicateItem(ProductId),
    /// A line has a quantity of zero.
    #[error("cart item {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// A product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier (unique within the cart).
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price, stored as an exact JSON number.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

/// A product to add to the cart, without a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl NewCartItem {
    fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

/// An ordered collection of cart line items, unique by product ID.
///
/// Serializes as a plain JSON array of [`CartItem`]s.
///
/// ```
/// use gomarket_core::{Cart, NewCartItem, ProductId};
/// use rust_decimal::Decimal;
///
/// let mut cart = Cart::new();
/// let item = NewCartItem {
///     id: ProductId::from("1"),
///     title: "Coffee".to_owned(),
///     image_url: "https://example.com/coffee.png".to_owned(),
///     price: Decimal::new(1999, 2),
/// };
///
/// cart.add(item.clone());
/// cart.add(item);
/// assert_eq!(cart.get(&ProductId::from("1")).map(|i| i.quantity), Some(2));
///
/// cart.decrement(&ProductId::from("1"));
/// cart.decrement(&ProductId::from("1"));
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from a list of items, checking the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if any item has a quantity of 0, or
    /// [`CartError::DuplicateItem`] if a product ID appears more than once.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        for (idx, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.id.clone()));
            }
            if items.iter().take(idx).any(|prev| prev.id == item.id) {
                return Err(CartError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// its title, image and price are replaced with the values from `item`.
    /// Otherwise the product is appended with a quantity of 1.
    pub fn add(&mut self, item: NewCartItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            let quantity = existing.quantity.saturating_add(1);
            *existing = item.with_quantity(quantity);
        } else {
            self.items.push(item.with_quantity(1));
        }
    }

    /// Add one unit to an existing line.
    ///
    /// Returns `false` and leaves the cart unchanged if `id` is not present.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.items.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Remove one unit from an existing line, dropping the line at zero.
    ///
    /// Returns `false` and leaves the cart unchanged if `id` is not present.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(pos) = self.items.iter().position(|line| &line.id == id) else {
            return false;
        };

        match self.items.get_mut(pos) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.items.remove(pos);
            }
        }
        true
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
