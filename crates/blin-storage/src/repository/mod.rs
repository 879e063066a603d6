//! # Repository Module
//!
//! Typed access to the slots the storefront uses.
//!
//! ```text
//! CartStore ──► storage.cart().save(&cart)
//!                     │
//!                     │  JSON array, whole-value overwrite
//!                     ▼
//!               SlotStore::set("blinCart", ...)
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`](cart::CartRepository) - the cart line items
//! - [`ConsentRepository`](consent::ConsentRepository) - the cookie consent flag

pub mod cart;
pub mod consent;
