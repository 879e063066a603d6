//! # Cart Store
//!
//! Owns the cart, keeps the slot in step with it and tells the page what
//! changed.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  Command              Cart change            Side effects               │
//! │  ───────              ───────────            ────────────               │
//! │                                                                         │
//! │  add_item ──────────► qty += 1 / push ─────► save, badge, toast        │
//! │                                                                         │
//! │  remove_item ───────► retain(id != ..) ────► save, badge,              │
//! │                                              detail (only if open)     │
//! │                                                                         │
//! │  update_quantity ───► qty += delta ────────► save, badge, detail       │
//! │                       (<= 0: remove path)                               │
//! │                                                                         │
//! │  clear_cart ────────► items = [] ──────────► save, badge, detail       │
//! │                                                                         │
//! │  NOTE: the slot equals the in-memory cart after every mutation.         │
//! │        A failed write keeps the in-memory change and is reported.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use blin_core::notification::{cart_added_message, NotificationKind};
use blin_core::{Cart, CartBadge, CartView, Money, QuantityChange};
use blin_storage::CartRepository;
use tracing::{debug, error};

use crate::error::AppResult;
use crate::render::CartRenderer;
use crate::state::notify::Notifier;

/// The cart plus everything it needs to stay durable and visible.
pub struct CartStore {
    cart: Cart,
    repo: CartRepository,
    renderer: Box<dyn CartRenderer>,
    notifier: Box<dyn Notifier>,
    detail_open: bool,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("repo", &self.repo)
            .field("detail_open", &self.detail_open)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Builds the store and loads the persisted cart.
    pub fn load(
        repo: CartRepository,
        renderer: Box<dyn CartRenderer>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let mut store = CartStore {
            cart: Cart::new(),
            repo,
            renderer,
            notifier,
            detail_open: false,
        };
        store.reload();
        store
    }

    /// Re-reads the slot. Absent or malformed content gives an empty cart.
    pub fn reload(&mut self) {
        self.cart = self.repo.load();
        debug!(
            slot = %self.repo.key(),
            items = self.cart.item_count(),
            "Cart state loaded"
        );
        self.refresh_badge();
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Returns
    /// The item's quantity after the add.
    pub fn add_item(&mut self, id: &str, name: &str, unit_price: Money) -> AppResult<i64> {
        debug!(product_id = %id, price = %unit_price, "add_item");
        let quantity = self.cart.add_item(id, name, unit_price)?;

        let saved = self.persist();
        self.refresh_badge();
        saved?;

        self.notifier
            .notify(NotificationKind::CartAdded, &cart_added_message(name));
        Ok(quantity)
    }

    /// Removes an item. Unknown ids are a no-op.
    ///
    /// ## Returns
    /// Whether something was removed.
    pub fn remove_item(&mut self, id: &str) -> AppResult<bool> {
        debug!(product_id = %id, "remove_item");
        let removed = self.cart.remove_item(id);
        self.after_removal()?;
        Ok(removed)
    }

    /// Changes an item's quantity by `delta`. Zero delta is rejected.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> AppResult<QuantityChange> {
        debug!(product_id = %id, delta, "update_quantity");
        let change = self.cart.update_quantity(id, delta)?;

        match change {
            QuantityChange::Missing => {}
            QuantityChange::Removed => self.after_removal()?,
            QuantityChange::Updated { .. } => {
                let saved = self.persist();
                self.refresh_badge();
                self.render_detail();
                saved?;
            }
        }
        Ok(change)
    }

    /// Empties the cart and the slot.
    pub fn clear_cart(&mut self) -> AppResult<()> {
        debug!(items = self.cart.item_count(), "clear_cart");
        self.cart.clear();

        let saved = self.persist();
        self.refresh_badge();
        self.render_detail();
        saved
    }

    fn after_removal(&mut self) -> AppResult<()> {
        let saved = self.persist();
        self.refresh_badge();
        if self.detail_open {
            self.render_detail();
        }
        saved
    }

    fn persist(&mut self) -> AppResult<()> {
        self.repo.save(&self.cart).map_err(|e| {
            error!(slot = %self.repo.key(), error = %e, "Failed to persist cart");
            e.into()
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Σ(unit price × quantity).
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Σ quantity.
    pub fn total_item_count(&self) -> i64 {
        self.cart.total_quantity()
    }

    /// The detail view for the current state. Does not touch the cart.
    pub fn render(&self) -> CartView {
        self.cart.view()
    }

    /// Pushes the current count to the cart button.
    pub fn refresh_badge(&mut self) -> CartBadge {
        let badge = self.cart.badge();
        self.renderer.update_badge(&badge);
        badge
    }

    // =========================================================================
    // Detail View
    // =========================================================================

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// Shows the detail view, rendering it fresh.
    pub fn open_detail(&mut self) -> CartView {
        self.detail_open = true;
        self.render_detail()
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    fn render_detail(&mut self) -> CartView {
        let view = self.render();
        self.renderer.render_detail(&view);
        view
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
