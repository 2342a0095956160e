//! GoMarket Core - Shared cart types.
//!
//! This crate provides the types used across all GoMarket components:
//! - `cart` - Persistent cart store and storage backends
//! - `cli` - Command-line front end for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart logic - no I/O, no storage
//! access, no async runtime. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, cart line items, and the [`Cart`] itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
