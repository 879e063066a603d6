//! # Error Types
//!
//! Domain-specific error types for blin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  blin-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  blin-storage errors (separate crate)                                  │
//! │  └── StorageError     - Slot read / write failures                     │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the page sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Page                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown ids and malformed slots are NOT errors here: removing or updating a
//! missing item is a no-op, and a corrupt slot loads as an empty cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart payload could not be encoded.
    #[error("Failed to encode cart: {0}")]
    Encode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a command carries a payload that breaks a precondition,
/// e.g. an add with an empty product id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// The change would push a cart figure past what an i64 holds.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Value must not be zero.
    #[error("{field} must not be zero")]
    MustBeNonZero { field: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
