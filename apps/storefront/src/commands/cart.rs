//! # Cart Commands
//!
//! Commands for cart manipulation. Every command answers with the full cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐   add_item    ┌──────────┐   open_cart   ┌──────────┐    │
//! │  │  Empty   │──────────────►│ In Cart  │──────────────►│  Detail  │    │
//! │  │  Cart    │               │          │◄──────────────│   Open   │    │
//! │  └──────────┘               └──────────┘   close_cart  └──────────┘    │
//! │       ▲                          │                          │          │
//! │       │                     remove_item              update_quantity   │
//! │       │                     update_quantity          remove_item       │
//! │       │                          │                          │          │
//! │       └──────── clear_cart ◄─────┴──────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use blin_core::{Cart, CartView, LineItem, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartStore;

/// Cart totals shown under the rows and on the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products
    pub line_count: usize,

    /// Sum of quantities (the badge number)
    pub item_count: i64,

    /// Sum of unit price × quantity
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.item_count(),
            item_count: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub view: CartView,
    pub totals: CartTotals,
    pub detail_open: bool,
}

impl From<&CartStore> for CartResponse {
    fn from(store: &CartStore) -> Self {
        CartResponse {
            items: store.cart().items().to_vec(),
            view: store.render(),
            totals: CartTotals::from(store.cart()),
            detail_open: store.is_detail_open(),
        }
    }
}

/// Current cart contents. Read only.
pub fn get_cart(store: &CartStore) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(store)
}

/// Adds one unit of a product ("В корзину" button).
///
/// ## Arguments
/// * `id` - Product id from the button
/// * `name` - Display name, shown in the toast
/// * `price` - Unit price in whole currency units
pub fn add_item(
    store: &mut CartStore,
    id: &str,
    name: &str,
    price: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, price, "add_item command");
    store.add_item(id, name, Money::from_units(price))?;
    Ok(CartResponse::from(&*store))
}

/// Removes a product entirely. Unknown ids are a no-op.
pub fn remove_item(store: &mut CartStore, id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, "remove_item command");
    store.remove_item(id)?;
    Ok(CartResponse::from(&*store))
}

/// Applies a +/- quantity change.
pub fn update_quantity(
    store: &mut CartStore,
    id: &str,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, delta, "update_quantity command");
    store.update_quantity(id, delta)?;
    Ok(CartResponse::from(&*store))
}

pub fn clear_cart(store: &mut CartStore) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    store.clear_cart()?;
    Ok(CartResponse::from(&*store))
}

/// Opens the detail view and renders it.
pub fn open_cart(store: &mut CartStore) -> CartResponse {
    debug!("open_cart command");
    store.open_detail();
    CartResponse::from(&*store)
}

pub fn close_cart(store: &mut CartStore) -> CartResponse {
    debug!("close_cart command");
    store.close_detail();
    CartResponse::from(&*store)
}
