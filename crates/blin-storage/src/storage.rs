//! # Storage Handle
//!
//! Opens the slot store and hands out repositories.
//!
//! ```text
//! StorageConfig::new(dir)   ──► Storage::open ──► FileSlotStore
//! StorageConfig::in_memory() ─► Storage::open ──► MemorySlotStore
//!                                     │
//!                     ┌───────────────┴───────────────┐
//!                     ▼                               ▼
//!              storage.cart()                 storage.consent()
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use blin_core::{DEFAULT_CART_SLOT, DEFAULT_CONSENT_SLOT};
use tracing::info;

use crate::error::StorageResult;
use crate::file::FileSlotStore;
use crate::repository::cart::CartRepository;
use crate::repository::consent::ConsentRepository;
use crate::slot::{MemorySlotStore, SharedSlots};

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StorageConfig::new("/var/lib/blin/slots")
///     .cart_key("blinCart")
///     .consent_key("blin_cookie_consent");
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Slot directory. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,

    /// Slot holding the cart.
    /// Default: "blinCart"
    pub cart_key: String,

    /// Slot holding the consent flag.
    /// Default: "blin_cookie_consent"
    pub consent_key: String,
}

impl StorageConfig {
    /// File-backed storage under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: Some(dir.into()),
            cart_key: DEFAULT_CART_SLOT.to_string(),
            consent_key: DEFAULT_CONSENT_SLOT.to_string(),
        }
    }

    /// Memory-only storage (for testing).
    pub fn in_memory() -> Self {
        StorageConfig {
            data_dir: None,
            cart_key: DEFAULT_CART_SLOT.to_string(),
            consent_key: DEFAULT_CONSENT_SLOT.to_string(),
        }
    }

    /// Sets the cart slot key.
    pub fn cart_key(mut self, key: impl Into<String>) -> Self {
        self.cart_key = key.into();
        self
    }

    /// Sets the consent slot key.
    pub fn consent_key(mut self, key: impl Into<String>) -> Self {
        self.consent_key = key.into();
        self
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Main storage handle providing repository access.
#[derive(Debug, Clone)]
pub struct Storage {
    slots: SharedSlots,
    cart_key: String,
    consent_key: String,
}

impl Storage {
    /// Opens the slot store described by `config`.
    pub fn open(config: StorageConfig) -> StorageResult<Self> {
        let slots: SharedSlots = match &config.data_dir {
            Some(dir) => Arc::new(FileSlotStore::open(dir)?),
            None => {
                info!("Using in-memory slots, nothing will persist");
                Arc::new(MemorySlotStore::new())
            }
        };
        Ok(Storage::with_slots(slots, config))
    }

    /// Wraps an existing slot store (tests inject fakes here).
    pub fn with_slots(slots: SharedSlots, config: StorageConfig) -> Self {
        Storage {
            slots,
            cart_key: config.cart_key,
            consent_key: config.consent_key,
        }
    }

    /// Raw slot access, for inspection and tooling.
    pub fn slots(&self) -> &SharedSlots {
        &self.slots
    }

    /// Returns the cart repository.
    pub fn cart(&self) -> CartRepository {
        CartRepository::new(Arc::clone(&self.slots), self.cart_key.clone())
    }

    /// Returns the consent repository.
    pub fn consent(&self) -> ConsentRepository {
        ConsentRepository::new(Arc::clone(&self.slots), self.consent_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotStore;

    #[test]
    fn test_config_builder() {
        let config = StorageConfig::new("/tmp/slots")
            .cart_key("cart")
            .consent_key("consent");

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/slots")));
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.consent_key, "consent");
    }

    #[test]
    fn test_repositories_share_slots() {
        let storage = Storage::open(StorageConfig::in_memory()).unwrap();
        storage.cart().clear().unwrap();

        assert_eq!(
            storage.slots().get(DEFAULT_CART_SLOT).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_open_file_backed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(StorageConfig::new(dir.path())).unwrap();
        storage.cart().clear().unwrap();

        assert!(dir.path().join("blinCart.json").exists());
    }
}
