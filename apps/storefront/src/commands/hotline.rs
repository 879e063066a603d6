//! # Hotline Commands
//!
//! The "Горячая линия" form and manual notification closing.
//!
//! An invalid form is not a command error: the visitor gets an error toast
//! and the response lists what to fix.

use blin_core::contact::{HotlineField, HotlineForm, FORM_INVALID_MESSAGE, FORM_SENT_MESSAGE};
use blin_core::notification::NotificationKind;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::Notifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotlineResponse {
    /// Whether the form was sent
    pub accepted: bool,

    /// Fields to mark, in form order (empty when accepted)
    pub invalid_fields: Vec<HotlineField>,

    /// The toast shown for this submission
    pub notification_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DismissResponse {
    pub id: Uuid,
    pub dismissed: bool,
}

/// Validates and "sends" the form.
pub fn submit_hotline(notifier: &mut dyn Notifier, form: &HotlineForm) -> HotlineResponse {
    debug!("submit_hotline command");

    match form.validate() {
        Ok(()) => {
            info!(
                topic = %form.topic,
                name = %form.name,
                contact = %form.contact,
                "Hotline message received"
            );
            let notification_id = notifier.notify(NotificationKind::Success, FORM_SENT_MESSAGE);
            HotlineResponse {
                accepted: true,
                invalid_fields: Vec::new(),
                notification_id,
            }
        }
        Err(invalid_fields) => {
            debug!(?invalid_fields, "Hotline form rejected");
            let notification_id = notifier.notify(NotificationKind::Error, FORM_INVALID_MESSAGE);
            HotlineResponse {
                accepted: false,
                invalid_fields,
                notification_id,
            }
        }
    }
}

/// Close button on a toast. Closing one that already left is fine.
pub fn dismiss_notification(notifier: &mut dyn Notifier, id: Uuid) -> DismissResponse {
    debug!(%id, "dismiss_notification command");
    DismissResponse {
        id,
        dismissed: notifier.dismiss(id),
    }
}
