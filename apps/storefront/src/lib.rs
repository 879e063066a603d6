//! # Storefront Library
//!
//! Composition root of the Blin storefront: builds the state objects and
//! drives them from typed commands.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (Storefront + driver loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore (cart + slot + renderer + notifier)
//! │   ├── consent.rs  ◄─── Cookie consent flag
//! │   ├── notify.rs   ◄─── Notifier trait, tokio-timed notifications
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command enum + dispatch
//! │   ├── cart.rs     ◄─── Cart commands
//! │   ├── consent.rs  ◄─── Consent commands
//! │   └── hotline.rs  ◄─── Contact form + notification closing
//! ├── render.rs       ◄─── CartRenderer trait, event renderer
//! ├── events.rs       ◄─── PageEvent, the stdout line format
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin line ──► Command::parse ──► dispatch ──► CartStore ──► slot     │
//! │                                        │            │                   │
//! │                                        │            ├──► CartRenderer ─┐│
//! │                                        │            └──► Notifier ─────┤│
//! │                                        ▼                               ││
//! │                              Response / Error ─────────────────────────┤│
//! │                                                                        ▼│
//! │                                               PageEvent channel ──► stdout
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod events;
pub mod render;
pub mod state;

use std::path::PathBuf;

use blin_storage::Storage;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::Handle;
use tracing::{error, info, warn};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::Command;
use events::{emit, EventReceiver, EventSender, PageEvent};
use render::EventRenderer;
use state::{CartStore, ConfigState, ConsentState, NotificationDelays, ScheduledNotifier};

// =============================================================================
// Storefront
// =============================================================================

/// Everything a command can touch.
#[derive(Debug)]
pub struct Storefront {
    pub config: ConfigState,
    pub cart: CartStore,
    pub consent: ConsentState,
    pub notifier: ScheduledNotifier,
    events: EventSender,
}

impl Storefront {
    /// Wires the state objects to one slot store and one event channel.
    ///
    /// Loads the cart, which also pushes the first badge.
    pub fn new(config: ConfigState, storage: &Storage, events: EventSender, runtime: Handle) -> Self {
        let notifier = ScheduledNotifier::new(
            runtime,
            events.clone(),
            NotificationDelays::from_config(&config),
        );
        let renderer = EventRenderer::new(events.clone(), &config);
        let cart = CartStore::load(
            storage.cart(),
            Box::new(renderer),
            Box::new(notifier.clone()),
        );
        let consent = ConsentState::new(storage.consent(), &config);

        Storefront {
            config,
            cart,
            consent,
            notifier,
            events,
        }
    }

    /// Tells the page whether to show the cookie prompt.
    pub fn announce_consent(&self, now: DateTime<Utc>) {
        let status = self.consent.status(now);
        emit(&self.events, PageEvent::Consent { status });
    }

    /// Parses and runs one input line, emitting the reply.
    pub fn handle_line(&mut self, line: &str, now: DateTime<Utc>) {
        let result = Command::parse(line).and_then(|command| commands::dispatch(self, command, now));

        let event = match result {
            Ok(response) => PageEvent::Response { response },
            Err(error) => {
                warn!(code = ?error.code, message = %error.message, "Command failed");
                PageEvent::Error { error }
            }
        };
        emit(&self.events, event);
    }

    /// Stops pending notification timers.
    pub fn shutdown(&self) {
        self.notifier.cancel_all();
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Runs the storefront until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ─────► stderr, RUST_LOG or the default filter    │
/// │                                                                         │
/// │  2. Load Config ────────────► defaults → storefront.toml → BLIN_*       │
/// │                                                                         │
/// │  3. Open Slots ─────────────► BLIN_DATA_DIR / config / platform dir     │
/// │     • Linux: ~/.local/share/storefront/slots                            │
/// │                                                                         │
/// │  4. Build State ────────────► CartStore::load (badge), ConsentState     │
/// │                                                                         │
/// │  5. Announce Consent ───────► prompt after 1.5 s, or nothing            │
/// │                                                                         │
/// │  6. Command Loop ───────────► one JSON command per stdin line           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = std::env::var_os("BLIN_CONFIG").map(PathBuf::from);
    let config = ConfigState::load(config_path.as_deref())?;
    info!(site = %config.site_name, "Starting storefront");

    let storage = Storage::open(config.storage_config(default_data_dir()))?;

    let (events, rx) = events::channel();
    let writer = tokio::spawn(write_events(rx));

    let mut app = Storefront::new(config, &storage, events, Handle::current());
    app.announce_consent(Utc::now());
    info!("State initialized, waiting for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        app.handle_line(&line, Utc::now());
    }

    info!("Input closed, shutting down");
    app.shutdown();
    drop(app);

    writer.await??;
    Ok(())
}

/// Writes events to stdout until every sender is gone.
async fn write_events(mut rx: EventReceiver) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();

    while let Some(event) = rx.recv().await {
        let mut line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to encode page event");
                continue;
            }
        };
        line.push('\n');
        stdout.write_all(line.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str =
    "info,storefront=debug,storefront_lib=debug,blin_core=debug,blin_storage=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries the page events.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=blin_storage=trace` - Trace slot access only
/// - Default: INFO, DEBUG for the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

/// The stderr subscriber; `filter` alone decides what is recorded.
fn build_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

/// Platform slot directory.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/ru.blin.storefront/slots`
/// - **Windows**: `%APPDATA%\blin\storefront\data\slots`
/// - **Linux**: `~/.local/share/storefront/slots`
fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("ru", "blin", "storefront").map(|dirs| dirs.data_dir().join("slots"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blin_storage::StorageConfig;

    fn drain(rx: &mut EventReceiver) -> Vec<PageEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test]
    async fn test_startup_pushes_badge_and_consent() {
        let (tx, mut rx) = events::channel();
        let storage = Storage::open(StorageConfig::in_memory()).unwrap();
        let app = Storefront::new(ConfigState::default(), &storage, tx, Handle::current());
        app.announce_consent(Utc::now());

        let events = drain(&mut rx);
        assert!(matches!(
            &events[0],
            PageEvent::Badge { label, count: 0 } if label == "Корзина"
        ));
        assert!(matches!(&events[1], PageEvent::Consent { status } if status.prompt_required()));
    }

    #[tokio::test]
    async fn test_handle_line_replies() {
        let (tx, mut rx) = events::channel();
        let storage = Storage::open(StorageConfig::in_memory()).unwrap();
        let mut app = Storefront::new(ConfigState::default(), &storage, tx, Handle::current());
        drain(&mut rx);

        app.handle_line(r#"{"kind":"add_item","id":"a","name":"Блин","price":100}"#, Utc::now());
        let events = drain(&mut rx);
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                PageEvent::Badge { .. } => "badge",
                PageEvent::Notification { .. } => "notification",
                PageEvent::Response { .. } => "response",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["badge", "notification", "response"]);

        app.handle_line("not json", Utc::now());
        assert!(matches!(drain(&mut rx).as_slice(), [PageEvent::Error { .. }]));
    }

    #[tokio::test]
    async fn test_cart_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::default();

        {
            let (tx, _rx) = events::channel();
            let storage = Storage::open(config.storage_config(Some(dir.path().to_path_buf()))).unwrap();
            let mut app = Storefront::new(config.clone(), &storage, tx, Handle::current());
            app.handle_line(r#"{"kind":"add_item","id":"a","name":"A","price":50}"#, Utc::now());
            app.handle_line(r#"{"kind":"add_item","id":"a","name":"A","price":50}"#, Utc::now());
            app.shutdown();
        }

        let (tx, _rx) = events::channel();
        let storage = Storage::open(config.storage_config(Some(dir.path().to_path_buf()))).unwrap();
        let app = Storefront::new(config, &storage, tx, Handle::current());

        assert_eq!(app.cart.total_item_count(), 2);
        assert_eq!(app.cart.total().units(), 100);
    }

    #[test]
    fn test_log_filter_is_not_overridden() {
        let subscriber = build_subscriber(EnvFilter::new("warn"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
            assert!(!tracing::enabled!(tracing::Level::INFO));
            assert!(tracing::enabled!(tracing::Level::WARN));
        });
    }

    #[test]
    fn test_default_filter_covers_library_crates() {
        let subscriber = build_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "blin_core::cart", tracing::Level::DEBUG));
            assert!(tracing::enabled!(target: "blin_storage::slot", tracing::Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper", tracing::Level::DEBUG));
            assert!(tracing::enabled!(target: "hyper", tracing::Level::INFO));
        });
    }

    #[test]
    fn test_page_event_wire_format() {
        let json = serde_json::to_value(PageEvent::Badge {
            label: "Корзина (2)".into(),
            count: 2,
        })
        .unwrap();

        assert_eq!(json["event"], "badge");
        assert_eq!(json["label"], "Корзина (2)");
    }
}
