//! # Rendering Sink
//!
//! `CartStore` never touches the page directly. It hands finished views to a
//! [`CartRenderer`], which the composition root picks.

use blin_core::{CartBadge, CartView};

use crate::events::{emit, EventSender, PageEvent};
use crate::state::ConfigState;

/// Receives cart views whenever the cart changes.
pub trait CartRenderer: Send {
    /// Draws the detail view (rows + total, or the empty placeholder).
    fn render_detail(&mut self, view: &CartView);

    /// Updates the cart button label.
    fn update_badge(&mut self, badge: &CartBadge);
}

/// Renderer that turns views into [`PageEvent`]s.
#[derive(Debug, Clone)]
pub struct EventRenderer {
    events: EventSender,
    config: ConfigState,
}

impl EventRenderer {
    pub fn new(events: EventSender, config: &ConfigState) -> Self {
        EventRenderer {
            events,
            config: config.clone(),
        }
    }
}

impl CartRenderer for EventRenderer {
    fn render_detail(&mut self, view: &CartView) {
        let placeholder = view
            .is_empty()
            .then(|| self.config.empty_cart_text.clone());
        emit(
            &self.events,
            PageEvent::CartDetail {
                view: view.clone(),
                total_text: self.config.format_price(view.total()),
                placeholder,
            },
        );
    }

    fn update_badge(&mut self, badge: &CartBadge) {
        emit(
            &self.events,
            PageEvent::Badge {
                label: badge.label(&self.config.cart_label),
                count: badge.count,
            },
        );
    }
}
