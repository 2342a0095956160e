//! Core types for GoMarket.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;

pub use cart::{Cart, CartError, CartItem, NewCartItem};
pub use id::ProductId;
