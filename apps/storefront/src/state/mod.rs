//! # State Module
//!
//! Focused state objects owned by the composition root.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────────┐             │
//! │  │  CartStore   │  │ ConsentState │  │ ScheduledNotifier │             │
//! │  │              │  │              │  │                   │             │
//! │  │  Cart        │  │  consent     │  │  Arc<Mutex<       │             │
//! │  │  cart slot   │  │  slot        │  │   Notification-   │             │
//! │  │  renderer    │  │              │  │   Center>>        │             │
//! │  │  notifier ───┼──┼──────────────┼─►│  timers           │             │
//! │  └──────────────┘  └──────────────┘  └───────────────────┘             │
//! │          │                 │                                            │
//! │          └───── SharedSlots (one store, two keys)                       │
//! │                                                                         │
//! │  ConfigState: read-only after load                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod consent;
pub mod notify;

pub use cart::CartStore;
pub use config::{ConfigError, ConfigState};
pub use consent::ConsentState;
pub use notify::{NotificationDelays, Notifier, ScheduledNotifier};
