use blin_core::Cart;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::slot::SharedSlots;

/// Repository for the cart slot.
///
/// ## Usage
/// ```rust,ignore
/// let repo = storage.cart();
///
/// let mut cart = repo.load();          // never fails
/// cart.add_item("7", "Блин", price)?;
/// repo.save(&cart)?;                   // full overwrite
/// ```
#[derive(Debug, Clone)]
pub struct CartRepository {
    slots: SharedSlots,
    key: String,
}

impl CartRepository {
    pub fn new(slots: SharedSlots, key: impl Into<String>) -> Self {
        CartRepository {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the cart, falling back to an empty one.
    ///
    /// ## Fallbacks
    /// - slot absent → empty cart
    /// - slot unreadable (I/O) → empty cart, logged
    /// - slot content not a line item array → empty cart, logged
    pub fn load(&self) -> Cart {
        let raw = match self.slots.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart slot unreadable, starting empty");
                return Cart::new();
            }
        };

        match Cart::from_slot_json(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, items = cart.item_count(), "Cart loaded");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is malformed, starting empty");
                Cart::new()
            }
        }
    }

    /// Overwrites the slot with `cart`.
    pub fn save(&self, cart: &Cart) -> StorageResult<()> {
        let raw = cart
            .to_slot_json()
            .map_err(|e| StorageError::encode(&self.key, e))?;
        self.slots.set(&self.key, &raw)
    }

    /// Writes an empty cart (`[]`).
    pub fn clear(&self) -> StorageResult<()> {
        self.save(&Cart::new())
    }
}
