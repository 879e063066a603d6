//! # Notifier
//!
//! Shows notifications and schedules their auto-dismiss.
//!
//! ```text
//! notify(kind, msg)
//!     │
//!     ├──► NotificationCenter::push ──► replaced form notices: abort timer,
//!     │                                 emit NotificationDismissed
//!     ├──► emit Notification
//!     └──► spawn: sleep(delay) ──► center.dismiss(id) ──► emit NotificationDismissed
//!                   │
//!                   └── JoinHandle kept per id, so cancel(id) can abort it
//! ```
//!
//! A timer that fires after the notification was closed by hand finds nothing
//! to dismiss and emits nothing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use blin_core::notification::{Notification, NotificationCenter, NotificationKind};
use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::events::{emit, EventSender, PageEvent};
use crate::state::ConfigState;

/// Notification side-channel used by `CartStore` and the hotline command.
pub trait Notifier: Send {
    /// Shows a notification and returns its id.
    fn notify(&mut self, kind: NotificationKind, message: &str) -> Uuid;

    /// Closes a notification. False when it was already gone.
    fn dismiss(&mut self, id: Uuid) -> bool;
}

/// Auto-dismiss delays per notification family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDelays {
    pub cart_added: Duration,
    pub form: Duration,
}

impl NotificationDelays {
    pub fn from_config(config: &ConfigState) -> Self {
        NotificationDelays {
            cart_added: Duration::from_millis(config.cart_notice_ms),
            form: Duration::from_millis(config.form_notice_ms),
        }
    }

    pub fn for_kind(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::CartAdded => self.cart_added,
            NotificationKind::Success | NotificationKind::Error => self.form,
        }
    }
}

type Timers = HashMap<Uuid, JoinHandle<()>>;

/// [`Notifier`] backed by tokio timers.
///
/// Cloning shares the same centre and timers.
#[derive(Debug, Clone)]
pub struct ScheduledNotifier {
    center: Arc<Mutex<NotificationCenter>>,
    timers: Arc<Mutex<Timers>>,
    events: EventSender,
    runtime: Handle,
    delays: NotificationDelays,
}

impl ScheduledNotifier {
    pub fn new(runtime: Handle, events: EventSender, delays: NotificationDelays) -> Self {
        ScheduledNotifier {
            center: Arc::new(Mutex::new(NotificationCenter::new())),
            timers: Arc::new(Mutex::new(HashMap::new())),
            events,
            runtime,
            delays,
        }
    }

    /// Notifications on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        lock(&self.center).active().to_vec()
    }

    pub fn is_active(&self, id: Uuid) -> bool {
        lock(&self.center).is_active(id)
    }

    /// Aborts the pending auto-dismiss. The notification stays visible.
    pub fn cancel(&self, id: Uuid) -> bool {
        match lock(&self.timers).remove(&id) {
            Some(timer) => {
                timer.abort();
                debug!(%id, "Auto-dismiss cancelled");
                true
            }
            None => false,
        }
    }

    /// Aborts every pending timer. Called on shutdown.
    pub fn cancel_all(&self) {
        for (_, timer) in lock(&self.timers).drain() {
            timer.abort();
        }
    }

    fn schedule(&self, id: Uuid, delay: Duration) {
        let center = Arc::clone(&self.center);
        let timers = Arc::clone(&self.timers);
        let events = self.events.clone();

        // Held across spawn so the task cannot remove its entry before it exists.
        let mut pending = lock(&self.timers);
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&timers).remove(&id);
            if lock(&center).dismiss(id) {
                debug!(%id, "Notification auto-dismissed");
                emit(&events, PageEvent::NotificationDismissed { id });
            }
        });
        pending.insert(id, timer);
    }
}

impl Notifier for ScheduledNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) -> Uuid {
        let delay = self.delays.for_kind(kind);
        let notification = Notification::new(kind, message, Utc::now(), delay.as_millis() as u64);
        let id = notification.id;

        let replaced = lock(&self.center).push(notification.clone());
        for old in replaced {
            self.cancel(old);
            emit(&self.events, PageEvent::NotificationDismissed { id: old });
        }

        debug!(%id, ?kind, "Notification shown");
        emit(&self.events, PageEvent::Notification { notification });
        self.schedule(id, delay);
        id
    }

    fn dismiss(&mut self, id: Uuid) -> bool {
        self.cancel(id);
        let dismissed = lock(&self.center).dismiss(id);
        if dismissed {
            emit(&self.events, PageEvent::NotificationDismissed { id });
        }
        dismissed
    }
}

/// Locks a mutex, recovering the data if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
