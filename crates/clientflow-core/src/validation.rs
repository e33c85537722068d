//! # Validation Module
//!
//! Input validation for ledger operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Presentation (excluded from this workspace)               │
//! │  └── Immediate user feedback on raw input                           │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL / foreign key constraints                             │
//! │                                                                     │
//! │  Defense in depth: each layer catches different errors              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Validates a required name field (client, product, category).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use clientflow_core::validation::validate_name;
///
/// assert_eq!(validate_name("name", "  Ahmed ").unwrap(), "Ahmed");
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    // Count characters, not bytes: accented names must not hit the cap early.
    if value.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(value.to_string())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed, e.g. giveaway lines)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates an item quantity.
///
/// ## Rules
/// - Must be non-negative. Zero is allowed: a zero-quantity line contributes
///   nothing to the total but is preserved verbatim.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates that an item-backed sale body carries at least one line.
///
/// ## Rules
/// - The item list must not be empty: a sale without lines must supply a
///   direct total instead, which has its own positivity rule.
pub fn validate_items_present<T>(items: &[T]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be strictly positive; zero or negative payments are meaningless
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a directly-supplied sale total (no item rows).
///
/// ## Rules
/// - Must be strictly positive. Item-derived totals are not validated here:
///   they are accepted as computed, including zero.
pub fn validate_direct_total(total: Money) -> ValidationResult<()> {
    if !total.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "total_amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
