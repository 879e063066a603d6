//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← adds the slot key                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (storefront) ← serialized for the page                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding failures on READ are not errors: the cart repository turns them
//! into an empty cart. Only writes and raw I/O surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a slot failed at the OS level.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("Slot '{key}' I/O failed: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Slot keys become file names, so they are restricted.
    #[error("Invalid slot key: '{0}'")]
    InvalidKey(String),

    /// Value could not be encoded before writing.
    #[error("Failed to encode slot '{key}': {message}")]
    Encode { key: String, message: String },

    /// A thread panicked while holding the in-memory store.
    #[error("Slot store lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }

    pub fn encode(key: impl Into<String>, message: impl ToString) -> Self {
        StorageError::Encode {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_slot() {
        let err = StorageError::io(
            "blinCart",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Slot 'blinCart' I/O failed: denied");

        let err = StorageError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid slot key: '../etc'");
    }
}
