//! # Storefront Entry Point
//!
//! Reads commands from stdin and writes page events to stdout, one JSON
//! object per line. Logs go to stderr.
//!
//! ```text
//! page script ──► {"kind":"add_item",...} ──► storefront ──► {"event":"badge",...}
//! ```
//!
//! The actual setup is in lib.rs so tests can build a `Storefront` directly.

#[tokio::main]
async fn main() {
    if let Err(e) = storefront_lib::run().await {
        tracing::error!(error = %e, "Storefront stopped");
        eprintln!("storefront: {}", e);
        std::process::exit(1);
    }
}
