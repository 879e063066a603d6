//! # Validation Module
//!
//! Field checks applied before a command reaches the cart.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Page script                                                   │
//! │  └── data-* attributes on buttons, parsed into a typed command          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command decoding (serde)                                      │
//! │  └── types: price and delta must be integers                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  └── id non-empty, price >= 0, delta != 0                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product id accepted.
pub const MAX_PRODUCT_ID_LEN: usize = 100;

/// Longest product name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id and returns it trimmed.
///
/// ## Example
/// ```rust
/// use blin_core::validation::validate_product_id;
///
/// assert_eq!(validate_product_id("  blin-1 ").unwrap(), "blin-1");
/// assert!(validate_product_id("   ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<&str> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::required("id"));
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(id)
}

/// Validates a product name.
///
/// Empty names are accepted; the notification then just reads
/// " добавлен в корзину!", which is what the page always did.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Returns true when a free-text form field holds something besides whitespace.
#[inline]
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// Zero is allowed (free items), negatives are not.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a quantity delta.
///
/// Any non-zero value is allowed, including deltas below -1.
pub fn validate_delta(delta: i64) -> ValidationResult<()> {
    if delta == 0 {
        return Err(ValidationError::MustBeNonZero {
            field: "delta".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert_eq!(validate_product_id("blin-1").unwrap(), "blin-1");
        assert_eq!(validate_product_id(" 42 ").unwrap(), "42");

        assert_eq!(
            validate_product_id(""),
            Err(ValidationError::required("id"))
        );
        assert!(validate_product_id("\t").is_err());
        assert!(validate_product_id(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Блин с икрой").is_ok());
        assert!(validate_product_name("").is_ok());
        assert!(validate_product_name(&"я".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_units(350)).is_ok());
        assert!(validate_unit_price(Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_validate_delta() {
        assert!(validate_delta(1).is_ok());
        assert!(validate_delta(-1).is_ok());
        assert!(validate_delta(-5).is_ok());
        assert!(validate_delta(0).is_err());
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled("Анна"));
        assert!(!is_filled("   "));
        assert!(!is_filled(""));
    }
}
