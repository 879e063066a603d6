//! # Commands Module
//!
//! Typed commands sent by the page, one JSON object per line.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Commands                                  │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Cart           │  │  Consent        │  │  Hotline                │ │
//! │  │  ────           │  │  ───────        │  │  ───────                │ │
//! │  │  add_item       │  │  consent_status │  │  submit_hotline         │ │
//! │  │  remove_item    │  │  accept_consent │  │  dismiss_notification   │ │
//! │  │  update_quantity│  │  reset_consent  │  │                         │ │
//! │  │  clear_cart     │  │                 │  │                         │ │
//! │  │  open_cart      │  │                 │  │                         │ │
//! │  │  close_cart     │  │                 │  │                         │ │
//! │  │  get_cart       │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```json
//! {"kind": "add_item", "id": "blin-honey", "name": "Блин с мёдом", "price": 120}
//! {"kind": "update_quantity", "id": "blin-honey", "delta": -1}
//! {"kind": "submit_hotline", "form": {"topic": "...", "privacyAgreed": true}}
//! ```

pub mod cart;
pub mod consent;
pub mod hotline;

use blin_core::contact::HotlineForm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::Storefront;

pub use cart::CartResponse;
pub use consent::ConsentResponse;
pub use hotline::{DismissResponse, HotlineResponse};

/// A command from the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    AddItem { id: String, name: String, price: i64 },
    RemoveItem { id: String },
    UpdateQuantity { id: String, delta: i64 },
    ClearCart,
    OpenCart,
    CloseCart,
    GetCart,
    ConsentStatus,
    AcceptConsent,
    ResetConsent,
    SubmitHotline { form: HotlineForm },
    DismissNotification { id: Uuid },
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Successful reply to a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandResponse {
    Cart(CartResponse),
    Consent(ConsentResponse),
    Hotline(HotlineResponse),
    Dismissed(DismissResponse),
}

/// Runs one command to completion.
pub fn dispatch(
    app: &mut Storefront,
    command: Command,
    now: DateTime<Utc>,
) -> Result<CommandResponse, ApiError> {
    let response = match command {
        Command::AddItem { id, name, price } => {
            CommandResponse::Cart(cart::add_item(&mut app.cart, &id, &name, price)?)
        }
        Command::RemoveItem { id } => CommandResponse::Cart(cart::remove_item(&mut app.cart, &id)?),
        Command::UpdateQuantity { id, delta } => {
            CommandResponse::Cart(cart::update_quantity(&mut app.cart, &id, delta)?)
        }
        Command::ClearCart => CommandResponse::Cart(cart::clear_cart(&mut app.cart)?),
        Command::OpenCart => CommandResponse::Cart(cart::open_cart(&mut app.cart)),
        Command::CloseCart => CommandResponse::Cart(cart::close_cart(&mut app.cart)),
        Command::GetCart => CommandResponse::Cart(cart::get_cart(&app.cart)),
        Command::ConsentStatus => {
            CommandResponse::Consent(consent::consent_status(&app.consent, now))
        }
        Command::AcceptConsent => {
            CommandResponse::Consent(consent::accept_consent(&app.consent, now)?)
        }
        Command::ResetConsent => {
            CommandResponse::Consent(consent::reset_consent(&app.consent, now)?)
        }
        Command::SubmitHotline { form } => {
            CommandResponse::Hotline(hotline::submit_hotline(&mut app.notifier, &form))
        }
        Command::DismissNotification { id } => {
            CommandResponse::Dismissed(hotline::dismiss_notification(&mut app.notifier, id))
        }
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::events::{self, EventReceiver, PageEvent};
    use crate::state::ConfigState;
    use blin_core::contact::HotlineField;
    use blin_core::Money;
    use blin_storage::{Storage, StorageConfig};
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn app() -> (Storefront, EventReceiver) {
        let (tx, rx) = events::channel();
        let storage = Storage::open(StorageConfig::in_memory()).unwrap();
        let app = Storefront::new(ConfigState::default(), &storage, tx, Handle::current());
        (app, rx)
    }

    fn run(app: &mut Storefront, line: &str) -> Result<CommandResponse, ApiError> {
        dispatch(app, Command::parse(line)?, Utc::now())
    }

    fn cart(response: CommandResponse) -> CartResponse {
        match response {
            CommandResponse::Cart(cart) => cart,
            other => panic!("expected cart response, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse(r#"{"kind":"update_quantity","id":"a","delta":-1}"#).unwrap(),
            Command::UpdateQuantity {
                id: "a".into(),
                delta: -1
            }
        );
        assert_eq!(
            Command::parse(r#"{"kind":"clear_cart"}"#).unwrap(),
            Command::ClearCart
        );

        let err = Command::parse(r#"{"kind":"checkout"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
        let err = Command::parse(r#"{"kind":"add_item","id":"a"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
    }

    #[tokio::test]
    async fn test_cart_commands() {
        let (mut app, _rx) = app();

        run(&mut app, r#"{"kind":"add_item","id":"a","name":"A","price":120}"#).unwrap();
        run(&mut app, r#"{"kind":"add_item","id":"a","name":"A","price":120}"#).unwrap();
        let response = cart(
            run(&mut app, r#"{"kind":"add_item","id":"b","name":"B","price":80}"#).unwrap(),
        );

        assert_eq!(response.totals.line_count, 2);
        assert_eq!(response.totals.item_count, 3);
        assert_eq!(response.totals.total, Money::from_units(320));

        let response = cart(
            run(&mut app, r#"{"kind":"update_quantity","id":"a","delta":-2}"#).unwrap(),
        );
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].id, "b");

        let response = cart(run(&mut app, r#"{"kind":"clear_cart"}"#).unwrap());
        assert!(response.view.is_empty());
    }

    #[tokio::test]
    async fn test_open_and_close_cart() {
        let (mut app, _rx) = app();

        assert!(cart(run(&mut app, r#"{"kind":"open_cart"}"#).unwrap()).detail_open);
        assert!(!cart(run(&mut app, r#"{"kind":"close_cart"}"#).unwrap()).detail_open);
        assert!(!cart(run(&mut app, r#"{"kind":"get_cart"}"#).unwrap()).detail_open);
    }

    #[tokio::test]
    async fn test_validation_error_maps_to_api_error() {
        let (mut app, _rx) = app();

        let err = run(&mut app, r#"{"kind":"add_item","id":"","name":"A","price":1}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = run(&mut app, r#"{"kind":"update_quantity","id":"a","delta":0}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_overflowing_add_is_a_validation_error() {
        let (mut app, _rx) = app();
        let line = format!(
            r#"{{"kind":"add_item","id":"a","name":"A","price":{}}}"#,
            i64::MAX / 2 + 1
        );

        run(&mut app, &line).unwrap();
        let err = run(&mut app, &line).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let response = cart(run(&mut app, r#"{"kind":"get_cart"}"#).unwrap());
        assert_eq!(response.totals.item_count, 1);
        assert_eq!(response.totals.total, Money::from_units(i64::MAX / 2 + 1));

        let err = run(
            &mut app,
            &format!(r#"{{"kind":"update_quantity","id":"a","delta":{}}}"#, i64::MAX),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_consent_commands() {
        let (mut app, _rx) = app();

        let status = |r: CommandResponse| match r {
            CommandResponse::Consent(c) => c.status,
            other => panic!("expected consent response, got {:?}", other),
        };

        assert!(status(run(&mut app, r#"{"kind":"consent_status"}"#).unwrap()).prompt_required());
        assert!(!status(run(&mut app, r#"{"kind":"accept_consent"}"#).unwrap()).prompt_required());
        assert!(!status(run(&mut app, r#"{"kind":"consent_status"}"#).unwrap()).prompt_required());
        assert!(status(run(&mut app, r#"{"kind":"reset_consent"}"#).unwrap()).prompt_required());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hotline_invalid_then_valid() {
        let (mut app, _rx) = app();

        let rejected = match run(
            &mut app,
            r#"{"kind":"submit_hotline","form":{"topic":"Доставка","name":"  "}}"#,
        )
        .unwrap()
        {
            CommandResponse::Hotline(h) => h,
            other => panic!("unexpected {:?}", other),
        };
        assert!(!rejected.accepted);
        assert_eq!(
            rejected.invalid_fields,
            vec![
                HotlineField::Name,
                HotlineField::Contact,
                HotlineField::Message,
                HotlineField::PrivacyAgreement
            ]
        );

        let accepted = match run(
            &mut app,
            r#"{"kind":"submit_hotline","form":{"topic":"Доставка","name":"Анна","contact":"+7 900 000-00-00","message":"Привет","privacyAgreed":true}}"#,
        )
        .unwrap()
        {
            CommandResponse::Hotline(h) => h,
            other => panic!("unexpected {:?}", other),
        };
        assert!(accepted.accepted);

        // The success toast replaced the error toast.
        let active = app.notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, accepted.notification_id);

        tokio::time::sleep(Duration::from_millis(5001)).await;
        assert!(app.notifier.active().is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let (mut app, mut rx) = app();
        run(&mut app, r#"{"kind":"add_item","id":"a","name":"A","price":1}"#).unwrap();
        let id = app.notifier.active()[0].id;

        let line = format!(r#"{{"kind":"dismiss_notification","id":"{}"}}"#, id);
        match run(&mut app, &line).unwrap() {
            CommandResponse::Dismissed(d) => assert!(d.dismissed),
            other => panic!("unexpected {:?}", other),
        }
        match run(&mut app, &line).unwrap() {
            CommandResponse::Dismissed(d) => assert!(!d.dismissed),
            other => panic!("unexpected {:?}", other),
        }

        let mut dismissed = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, PageEvent::NotificationDismissed { .. }) {
                dismissed += 1;
            }
        }
        assert_eq!(dismissed, 1);
    }

    #[test]
    fn test_response_serialization() {
        let response = CommandResponse::Dismissed(DismissResponse {
            id: Uuid::nil(),
            dismissed: true,
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["kind"], "dismissed");
        assert_eq!(json["dismissed"], true);
    }
}
