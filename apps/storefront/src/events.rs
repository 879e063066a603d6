//! # Page Events
//!
//! Everything the storefront tells the page goes through one channel and is
//! written to stdout as one JSON object per line.
//!
//! ```text
//! CartRenderer ───────┐
//! ScheduledNotifier ──┼──► EventSender ──► writer task ──► stdout
//! command replies ────┘
//! ```

use blin_core::consent::ConsentStatus;
use blin_core::notification::Notification;
use blin_core::CartView;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::commands::CommandResponse;
use crate::error::ApiError;

/// One line on stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PageEvent {
    /// Cart button label changed.
    #[serde(rename_all = "camelCase")]
    Badge { label: String, count: i64 },

    /// Cart detail view contents.
    #[serde(rename_all = "camelCase")]
    CartDetail {
        view: CartView,
        total_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },

    /// A notification appeared.
    Notification { notification: Notification },

    /// A notification went away (timer or manual close).
    NotificationDismissed { id: Uuid },

    /// Consent prompt state, sent once at startup.
    Consent { status: ConsentStatus },

    /// Successful command reply.
    Response { response: CommandResponse },

    /// Failed command reply.
    Error { error: ApiError },
}

pub type EventSender = mpsc::UnboundedSender<PageEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PageEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Sends an event. A closed channel only means the page went away.
pub fn emit(events: &EventSender, event: PageEvent) {
    if events.send(event).is_err() {
        warn!("Event channel closed, dropping event");
    }
}
