//! # Cart
//!
//! The ordered, id-unique collection of line items behind the cart widget.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add_item(id, ..)        id present? ── yes ──► quantity += 1           │
//! │                                     └── no ───► push(quantity = 1)      │
//! │                                                                         │
//! │  update_quantity(id, d)  id present? ── no ───► Missing (no-op)         │
//! │                                     └── yes ──► quantity += d           │
//! │                                                  │                      │
//! │                                     quantity <= 0 ──► remove the item   │
//! │                                                                         │
//! │  remove_item(id)         retain(item.id != id)   (absent: no-op)        │
//! │                                                                         │
//! │  clear()                 items = []                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `id`
//! - Every stored quantity is >= 1
//! - Insertion order is display order

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CartBadge, CartRow, CartView, LineItem};
use crate::validation::{validate_delta, validate_product_id, validate_product_name, validate_unit_price};

/// Result of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No item with that id; nothing changed.
    Missing,

    /// Item kept with its new quantity.
    Updated { quantity: i64 },

    /// Quantity dropped to zero or below, so the item was removed.
    Removed,
}

/// The shopping cart.
///
/// Serializes as a bare JSON array of [`LineItem`], which is the slot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from stored items, restoring the invariants.
    ///
    /// Ids are trimmed. Items with a blank id, a negative price or a quantity
    /// below 1 are dropped; a repeated id is folded into its first occurrence.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Cart::new();
        for mut item in items {
            item.id = item.id.trim().to_string();
            if item.id.is_empty() || item.quantity < 1 || item.unit_price.is_negative() {
                continue;
            }
            let candidate = match cart.item(&item.id) {
                Some(existing) => match existing.quantity.checked_add(item.quantity) {
                    Some(quantity) => LineItem { quantity, ..existing.clone() },
                    None => continue,
                },
                None => item,
            };
            // Entries that would overflow the totals are dropped like any other bad entry.
            if cart.checked_totals(&candidate).is_some() {
                cart.put(candidate);
            }
        }
        cart
    }

    /// Parses the slot payload.
    ///
    /// Errors are returned, not swallowed: the caller decides to fall back to
    /// an empty cart and logs why.
    pub fn from_slot_json(raw: &str) -> Result<Self, serde_json::Error> {
        let items: Vec<LineItem> = serde_json::from_str(raw)?;
        Ok(Cart::from_items(items))
    }

    /// Encodes the cart for the slot.
    pub fn to_slot_json(&self) -> CoreResult<String> {
        serde_json::to_string(&self.items).map_err(|e| CoreError::Encode(e.to_string()))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - If the id is already in the cart: quantity += 1 (name and price of
    ///   the existing entry are kept)
    /// - Otherwise: a new item with quantity 1 is appended
    ///
    /// ## Returns
    /// The item's quantity after the add.
    pub fn add_item(&mut self, id: &str, name: &str, unit_price: Money) -> CoreResult<i64> {
        let id = validate_product_id(id)?;
        validate_product_name(name)?;
        validate_unit_price(unit_price)?;

        let candidate = match self.item(id) {
            Some(existing) => LineItem {
                quantity: existing.quantity.checked_add(1).ok_or_else(too_large)?,
                ..existing.clone()
            },
            None => LineItem::new(id, name, unit_price),
        };
        self.checked_totals(&candidate).ok_or_else(too_large)?;

        let quantity = candidate.quantity;
        self.put(candidate);
        Ok(quantity)
    }

    /// Removes the item with `id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let id = id.trim();
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Adds `delta` to the quantity of the item with `id`.
    ///
    /// A result of zero or below removes the item instead of storing it.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> CoreResult<QuantityChange> {
        validate_delta(delta)?;

        let Some(item) = self.item(id) else {
            return Ok(QuantityChange::Missing);
        };

        // quantity >= 1, so only a positive delta can overflow.
        let quantity = item.quantity.checked_add(delta).ok_or_else(too_large)?;
        if quantity <= 0 {
            self.remove_item(id);
            return Ok(QuantityChange::Removed);
        }

        let candidate = LineItem {
            quantity,
            ..item.clone()
        };
        self.checked_totals(&candidate).ok_or_else(too_large)?;

        self.put(candidate);
        Ok(QuantityChange::Updated { quantity })
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up an item by id. Surrounding whitespace in `id` is ignored.
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        let id = id.trim();
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Σ(unit price × quantity).
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds the detail view. Read-only.
    pub fn view(&self) -> CartView {
        if self.items.is_empty() {
            return CartView::Empty;
        }

        CartView::Items {
            rows: self.items.iter().map(CartRow::from).collect(),
            total: self.total(),
        }
    }

    /// Badge for the cart button.
    pub fn badge(&self) -> CartBadge {
        CartBadge::new(self.total_quantity())
    }
}

impl Cart {
    /// Σ quantity and Σ subtotal with `changed` replacing (or joining) its
    /// id. `None` when either would overflow.
    fn checked_totals(&self, changed: &LineItem) -> Option<(i64, Money)> {
        let others = self.items.iter().filter(|i| i.id != changed.id);
        others
            .chain(std::iter::once(changed))
            .try_fold((0i64, Money::zero()), |(quantity, total), item| {
                let subtotal = item.unit_price.checked_multiply_quantity(item.quantity)?;
                Some((quantity.checked_add(item.quantity)?, total.checked_add(subtotal)?))
            })
    }

    /// Replaces the item with the same id in place, or appends it.
    fn put(&mut self, item: LineItem) {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}

fn too_large() -> ValidationError {
    ValidationError::TooLarge {
        field: "cart total".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn price(units: i64) -> Money {
        Money::from_units(units)
    }

    #[test]
    fn test_add_same_id_twice_increments() {
        let mut cart = Cart::new();

        assert_eq!(cart.add_item("x", "A", price(10)).unwrap(), 1);
        assert_eq!(cart.add_item("x", "A", price(10)).unwrap(), 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.item("x").map(|i| i.quantity), Some(2));
        assert_eq!(cart.total(), price(20));
    }

    #[test]
    fn test_repeated_adds_count_calls() {
        let mut cart = Cart::new();
        for _ in 0..25 {
            cart.add_item("pancake", "Блин", price(7)).unwrap();
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_quantity(), 25);
        assert_eq!(cart.total(), price(175));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item("b", "B", price(1)).unwrap();
        cart.add_item("a", "A", price(2)).unwrap();
        cart.add_item("b", "B", price(1)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut cart = Cart::new();

        let err = cart.add_item("  ", "A", price(1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));

        assert!(cart.add_item("a", "A", price(-5)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_trims_id() {
        let mut cart = Cart::new();
        cart.add_item(" a ", "A", price(1)).unwrap();
        cart.add_item("a", "A", price(1)).unwrap();
        assert_eq!(cart.item("a").map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_padded_id_matches_on_every_path() {
        let mut cart = Cart::new();
        cart.add_item(" a ", "A", price(1)).unwrap();

        assert_eq!(
            cart.update_quantity(" a", 1).unwrap(),
            QuantityChange::Updated { quantity: 2 }
        );
        assert!(cart.remove_item("a "));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_total_overflow() {
        let mut cart = Cart::new();
        let big = price(i64::MAX / 2 + 1);
        cart.add_item("x", "A", big).unwrap();

        let err = cart.add_item("x", "A", big).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooLarge { .. })
        ));
        assert!(cart.add_item("y", "B", big).is_err());

        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total(), big);
    }

    #[test]
    fn test_update_rejects_overflow() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(2)).unwrap();

        assert!(cart.update_quantity("x", i64::MAX).is_err());
        assert!(cart.update_quantity("x", i64::MAX / 2).is_err());
        assert_eq!(cart.item("x").map(|i| i.quantity), Some(1));

        assert_eq!(cart.update_quantity("x", i64::MIN).unwrap(), QuantityChange::Removed);
    }

    #[test]
    fn test_slot_with_overflowing_entries_loads_what_fits() {
        let max = i64::MAX;
        let raw = format!(
            r#"[{{"id":"a","name":"A","price":1,"quantity":{max}}},
                {{"id":"b","name":"B","price":1,"quantity":{max}}},
                {{"id":"a","name":"A","price":1,"quantity":1}},
                {{"id":"c","name":"C","price":{max},"quantity":2}}]"#
        );
        let cart = Cart::from_slot_json(&raw).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(cart.badge().count, max);
        assert_eq!(cart.total(), price(max));
    }

    #[test]
    fn test_slot_ids_are_trimmed() {
        let cart = Cart::from_slot_json(
            r#"[{"id":" a ","name":"A","price":1,"quantity":1},{"id":"a","name":"A","price":1,"quantity":2}]"#,
        )
        .unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.item("a").map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_decrement_from_one_removes() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();

        assert_eq!(cart.update_quantity("x", -1).unwrap(), QuantityChange::Removed);
        assert!(cart.item("x").is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_large_negative_delta_removes() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();
        cart.add_item("x", "A", price(10)).unwrap();

        assert_eq!(cart.update_quantity("x", -7).unwrap(), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();

        assert_eq!(
            cart.update_quantity("x", 3).unwrap(),
            QuantityChange::Updated { quantity: 4 }
        );
        assert_eq!(
            cart.update_quantity("x", -2).unwrap(),
            QuantityChange::Updated { quantity: 2 }
        );
        assert_eq!(cart.total(), price(20));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();
        let before = cart.clone();

        assert_eq!(cart.update_quantity("nope", 1).unwrap(), QuantityChange::Missing);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_zero_delta_rejected() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();
        assert!(cart.update_quantity("x", 0).is_err());
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();
        let before = cart.clone();

        assert!(!cart.remove_item("y"));
        assert_eq!(cart, before);
        assert!(cart.remove_item("x"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item("x", "A", price(10)).unwrap();
        cart.add_item("y", "B", price(5)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_view_rows_and_total() {
        let mut cart = Cart::new();
        assert_eq!(cart.view(), CartView::Empty);

        cart.add_item("x", "A", price(10)).unwrap();
        cart.add_item("y", "B", price(3)).unwrap();
        cart.update_quantity("y", 2).unwrap();

        let view = cart.view();
        assert_eq!(view.total(), price(19));
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.rows()[1].line_subtotal, price(9));
        assert_eq!(view.rows()[1].quantity, 3);
    }

    #[test]
    fn test_badge_follows_quantity() {
        let mut cart = Cart::new();
        assert!(!cart.badge().shows_count());

        cart.add_item("x", "A", price(10)).unwrap();
        cart.add_item("x", "A", price(10)).unwrap();
        cart.add_item("y", "B", price(10)).unwrap();
        assert_eq!(cart.badge().count, 3);
    }

    #[test]
    fn test_slot_round_trip() {
        let mut cart = Cart::new();
        cart.add_item("x", "Блин", price(10)).unwrap();
        cart.add_item("y", "Чай", price(0)).unwrap();
        cart.update_quantity("x", 4).unwrap();

        let raw = cart.to_slot_json().unwrap();
        assert_eq!(Cart::from_slot_json(&raw).unwrap(), cart);
    }

    #[test]
    fn test_slot_format_matches_page_script() {
        let raw = r#"[{"id":"7","name":"Блин","price":150,"quantity":2}]"#;
        let cart = Cart::from_slot_json(raw).unwrap();

        assert_eq!(cart.total(), price(300));
        assert_eq!(cart.to_slot_json().unwrap(), raw);
    }

    #[test]
    fn test_corrupt_slot_is_an_error() {
        assert!(Cart::from_slot_json("not json").is_err());
        assert!(Cart::from_slot_json(r#"{"id":"x"}"#).is_err());
        assert!(Cart::from_slot_json(r#"[{"id":"x","name":"A","price":"ten","quantity":1}]"#).is_err());
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let raw = r#"[
            {"id":"a","name":"A","price":5,"quantity":1},
            {"id":"b","name":"B","price":5,"quantity":0},
            {"id":"a","name":"A","price":5,"quantity":2},
            {"id":"","name":"C","price":5,"quantity":1},
            {"id":"d","name":"D","price":-1,"quantity":1}
        ]"#;
        let cart = Cart::from_slot_json(raw).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.item("a").map(|i| i.quantity), Some(3));
    }
}
