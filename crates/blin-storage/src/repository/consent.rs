use blin_core::consent::ConsentRecord;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::slot::SharedSlots;

/// Repository for the cookie consent flag.
#[derive(Debug, Clone)]
pub struct ConsentRepository {
    slots: SharedSlots,
    key: String,
}

impl ConsentRepository {
    pub fn new(slots: SharedSlots, key: impl Into<String>) -> Self {
        ConsentRepository {
            slots,
            key: key.into(),
        }
    }

    /// Reads the flag. Anything unreadable counts as "not accepted".
    pub fn load(&self) -> Option<ConsentRecord> {
        let raw = match self.slots.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Consent slot unreadable");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Consent flag malformed, ignoring it");
                None
            }
        }
    }

    pub fn save(&self, record: &ConsentRecord) -> StorageResult<()> {
        let raw = serde_json::to_string(record).map_err(|e| StorageError::encode(&self.key, e))?;
        self.slots.set(&self.key, &raw)?;
        debug!(key = %self.key, expires_at = %record.expires_at, "Consent stored");
        Ok(())
    }

    /// Forgets the flag, so the next visit prompts again.
    pub fn reset(&self) -> StorageResult<()> {
        self.slots.remove(&self.key)
    }
}
