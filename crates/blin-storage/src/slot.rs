//! # Slot Stores
//!
//! A slot store maps a key to one whole string value. There are no partial
//! updates: `set` replaces whatever was there, last write wins.
//!
//! Stores take `&self` and are shared behind an `Arc`, so the cart and the
//! consent flag can live in the same store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{StorageError, StorageResult};

/// Durable key-value slots.
pub trait SlotStore: Send + Sync + fmt::Debug {
    /// Reads a slot. `Ok(None)` when the slot was never written or was removed.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites a slot.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes a slot. Removing an absent slot is fine.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Keys currently holding a value, sorted.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Slot store handle shared between repositories.
pub type SharedSlots = Arc<dyn SlotStore>;

/// Slots kept in process memory. Used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given slots already written.
    pub fn with_slots<K, V>(slots: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MemorySlotStore {
            slots: Mutex::new(
                slots
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.slots.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}
