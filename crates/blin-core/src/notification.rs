//! # Notifications
//!
//! Transient messages shown at the top of the page.
//!
//! Two families behave differently when a new one arrives:
//! - `CartAdded` notices stack (each add gets its own toast)
//! - `Success` / `Error` form notices replace any form notice still showing
//!
//! Scheduling the auto-dismiss is the app's job; this module only keeps the
//! list of what is visible and answers "dismiss this id", which is a no-op for
//! an id that is already gone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Kind of notification, which also picks the styling on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    /// "<name> добавлен в корзину!"
    CartAdded,
    /// Hotline form sent.
    Success,
    /// Hotline form rejected.
    Error,
}

impl NotificationKind {
    /// Form notices replace each other; cart notices stack.
    pub fn replaces_previous(&self) -> bool {
        matches!(self, NotificationKind::Success | NotificationKind::Error)
    }
}

/// Text of the toast shown after an add.
pub fn cart_added_message(name: &str) -> String {
    format!("{} добавлен в корзину!", name)
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[ts(as = "String")]
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Auto-dismiss delay.
    pub dismiss_after_ms: u64,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        dismiss_after_ms: u64,
    ) -> Self {
        Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at,
            dismiss_after_ms,
        }
    }
}

/// The list of notifications currently on screen.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    active: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a notification.
    ///
    /// ## Returns
    /// Ids of form notices that were replaced by this one (empty for cart
    /// notices), so the caller can cancel their pending dismissals.
    pub fn push(&mut self, notification: Notification) -> Vec<Uuid> {
        let mut replaced = Vec::new();
        if notification.kind.replaces_previous() {
            self.active.retain(|n| {
                if n.kind.replaces_previous() {
                    replaced.push(n.id);
                    false
                } else {
                    true
                }
            });
        }
        self.active.push(notification);
        replaced
    }

    /// Removes a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let initial_len = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != initial_len
    }

    /// Notifications on screen, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn is_active(&self, id: Uuid) -> bool {
        self.active.iter().any(|n| n.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
