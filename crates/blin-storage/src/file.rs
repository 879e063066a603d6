//! # File Slot Store
//!
//! One file per slot under a data directory:
//!
//! ```text
//! <data_dir>/
//! ├── blinCart.json
//! └── blin_cookie_consent.json
//! ```
//!
//! Writes go to `<key>.json.tmp` and are renamed over the slot file, so a
//! reader never sees half a value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::slot::SlotStore;

const SLOT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileSlotStore {
    root: PathBuf,
}

impl FileSlotStore {
    /// Opens (and creates if needed) a slot directory.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StorageError::io(root.display().to_string(), e))?;
        info!(path = %root.display(), "Slot directory ready");
        Ok(FileSlotStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, SLOT_EXTENSION)))
    }
}

/// Keys are used as file names: ASCII letters, digits, `-` and `_` only.
fn validate_key(key: &str) -> StorageResult<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl SlotStore for FileSlotStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension(format!("{}.tmp", SLOT_EXTENSION));

        fs::write(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(key, e))?;

        debug!(key, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "Slot removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| StorageError::io(self.root.display().to_string(), e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(self.root.display().to_string(), e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
