//! # blin-core: Pure Logic for the Blin Storefront
//!
//! Everything the page widgets decide, without touching storage, timers or
//! the page itself.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Blin Storefront Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page (markup + scripts)                      │   │
//! │  │   "В корзину" buttons ──► Cart modal ──► Hotline form          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ typed commands (JSON lines)            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │    CartStore, ConsentState, Notifier, CartRenderer              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ blin-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │   cart   │ │  money   │ │ consent  │ │ notification     │  │   │
//! │  │   │ LineItem │ │  Money   │ │  record  │ │ contact (forms)  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK READS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              blin-storage (durable slots)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (LineItem, CartRow, CartView, CartBadge)
//! - [`money`] - Integer money (whole currency units)
//! - [`cart`] - The ordered, id-unique line item collection
//! - [`consent`] - Cookie consent record and expiry rules
//! - [`notification`] - Transient notifications and their bookkeeping
//! - [`contact`] - Hotline form validation
//! - [`validation`] - Field-level input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use blin_core::cart::Cart;
//! use blin_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add_item("blin-1", "Блин с мёдом", Money::from_units(10)).unwrap();
//! cart.add_item("blin-1", "Блин с мёдом", Money::from_units(10)).unwrap();
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total().units(), 20);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod consent;
pub mod contact;
pub mod error;
pub mod money;
pub mod notification;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, QuantityChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Slot key the cart is persisted under.
pub const DEFAULT_CART_SLOT: &str = "blinCart";

/// Slot key of the cookie consent flag.
pub const DEFAULT_CONSENT_SLOT: &str = "blin_cookie_consent";

/// How long an accepted consent stays valid.
pub const CONSENT_VALIDITY_DAYS: i64 = 90;

/// Delay before the consent prompt is shown to a visitor who has not accepted.
pub const CONSENT_PROMPT_DELAY_MS: u64 = 1500;

/// Auto-dismiss delay for the "added to cart" notice.
pub const CART_NOTICE_MS: u64 = 2000;

/// Auto-dismiss delay for hotline form feedback.
pub const FORM_NOTICE_MS: u64 = 5000;
