//! # Domain Types
//!
//! Types shared between the cart, the durable slot and the rendering sink.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐      ┌─────────────────┐   ┌─────────────────┐    │
//! │  │    LineItem     │ ───► │     CartRow     │   │    CartBadge    │    │
//! │  │  ─────────────  │      │  ─────────────  │   │  ─────────────  │    │
//! │  │  id             │      │  name           │   │  count          │    │
//! │  │  name           │      │  unit_price     │   │  "Корзина"      │    │
//! │  │  price          │      │  quantity       │   │  "Корзина (3)"  │    │
//! │  │  quantity       │      │  line_subtotal  │   └─────────────────┘    │
//! │  └─────────────────┘      └────────┬────────┘                          │
//! │   (stored in slot)                 ▼                                    │
//! │                           ┌─────────────────┐                          │
//! │                           │    CartView     │                          │
//! │                           │  Empty | Items  │                          │
//! │                           └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One product's entry in the cart.
///
/// ## Slot Format
/// Stored exactly as the page script has always written it:
/// ```json
/// {"id": "blin-honey", "name": "Блин с мёдом", "price": 120, "quantity": 2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: String,

    /// Display name captured when the item was first added.
    pub name: String,

    /// Price of one unit.
    #[serde(rename = "price")]
    pub unit_price: Money,

    /// Always >= 1 while the item is in a cart.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a new line item with quantity 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Display Rows
// =============================================================================

/// One row of the cart detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_subtotal: Money,
}

impl From<&LineItem> for CartRow {
    fn from(item: &LineItem) -> Self {
        CartRow {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_subtotal: item.line_subtotal(),
        }
    }
}

/// What the cart detail view should show.
///
/// An empty cart gets its own placeholder variant rather than an empty list,
/// so the sink can print "Корзина пуста" without inspecting rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CartView {
    /// No items: show the placeholder, total reads 0.
    Empty,

    /// Rows in insertion order plus the cart total.
    Items { rows: Vec<CartRow>, total: Money },
}

impl CartView {
    /// The total to print under the rows (zero for the placeholder).
    pub fn total(&self) -> Money {
        match self {
            CartView::Empty => Money::zero(),
            CartView::Items { total, .. } => *total,
        }
    }

    /// Display rows, empty for the placeholder.
    pub fn rows(&self) -> &[CartRow] {
        match self {
            CartView::Empty => &[],
            CartView::Items { rows, .. } => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CartView::Empty)
    }
}

// =============================================================================
// Badge
// =============================================================================

/// Item count shown on the persistent cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartBadge {
    /// Sum of quantities across all items.
    pub count: i64,
}

impl CartBadge {
    pub fn new(count: i64) -> Self {
        CartBadge { count }
    }

    /// Whether the numeric suffix is shown at all.
    pub fn shows_count(&self) -> bool {
        self.count > 0
    }

    /// Button label: `"Корзина"` for an empty cart, `"Корзина (3)"` otherwise.
    ///
    /// ## Example
    /// ```rust
    /// use blin_core::CartBadge;
    ///
    /// assert_eq!(CartBadge::new(0).label("Корзина"), "Корзина");
    /// assert_eq!(CartBadge::new(3).label("Корзина"), "Корзина (3)");
    /// ```
    pub fn label(&self, base: &str) -> String {
        if self.shows_count() {
            format!("{} ({})", base, self.count)
        } else {
            base.to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
