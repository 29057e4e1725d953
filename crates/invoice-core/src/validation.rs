//! # Validation Module
//!
//! Input validation for the review/edit layer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Chat UI (TypeScript)                                         │
//! │  ├── Basic format checks on the review form                            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + normalize/finalize                             │
//! │  ├── Non-negative quantities, prices, tax, discount                    │
//! │  └── Required parties and non-empty line items                         │
//! │                                                                         │
//! │  The arithmetic layer (money) validates NOTHING: it computes a         │
//! │  consistent result for whatever it is given. Constraining signs is     │
//! │  the caller's job, via these functions.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a sender or recipient name.
///
/// ## Example
/// ```rust
/// use invoice_core::validation::validate_party_name;
///
/// assert!(validate_party_name("fromName", "Acme Studio").is_ok());
/// assert!(validate_party_name("fromName", "   ").is_err());
/// ```
pub fn validate_party_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a currency code: three ASCII letters, ISO-4217 style.
///
/// The code is a label on the amounts, not a conversion key, so only the
/// shape is checked.
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a three-letter code like USD".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity (zero allowed: a placeholder row).
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    non_negative("quantity", quantity)
}

/// Validates a unit price (zero allowed: free items).
pub fn validate_unit_price(unit_price: Decimal) -> ValidationResult<()> {
    non_negative("unitPrice", unit_price)
}

/// Validates a tax percentage.
pub fn validate_tax_percentage(tax_percentage: Decimal) -> ValidationResult<()> {
    non_negative("taxPercentage", tax_percentage)
}

/// Validates a flat discount amount.
///
/// A discount larger than the subtotal is allowed; the grand total floors
/// at zero rather than going negative.
pub fn validate_discount_amount(discount_amount: Decimal) -> ValidationResult<()> {
    non_negative("discountAmount", discount_amount)
}

fn non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
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
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_party_name() {
        assert!(validate_party_name("fromName", "Acme Studio").is_ok());
        assert!(validate_party_name("fromName", "").is_err());
        assert!(validate_party_name("toName", "   ").is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("eur").is_ok());
        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("DOLLARS").is_err());
        assert!(validate_currency_code("U$D").is_err());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_quantity(dec!(0)).is_ok());
        assert!(validate_quantity(dec!(2.5)).is_ok());
        assert!(validate_quantity(dec!(-1)).is_err());

        assert!(validate_unit_price(dec!(0)).is_ok());
        assert!(validate_unit_price(dec!(-0.01)).is_err());

        assert!(validate_tax_percentage(dec!(8.25)).is_ok());
        assert!(validate_tax_percentage(dec!(-5)).is_err());

        assert!(validate_discount_amount(dec!(1000)).is_ok());
        assert!(validate_discount_amount(dec!(-1)).is_err());
    }
}
