//! # Error Types
//!
//! Domain-specific error types for invoice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoice-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Missing/ill-formed input                       │
//! │                                                                         │
//! │  invoice-client errors (separate crate)                                │
//! │  └── ClientError      - Endpoint call failures                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → UI prompt for the missing data    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, item id)
//! 3. Errors are enum variants, never String
//! 4. Every failure is recoverable: it rejects one normalize/finalize call
//!    and leaves the caller's draft and chat history untouched
//!
//! There is deliberately no `ArithmeticInconsistency` error. Totals are
//! always recomputed from line items instead of trusted from input, so that
//! class of failure cannot occur.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing prompts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item cannot be found on the draft.
    ///
    /// ## When This Occurs
    /// - Patching an item by id after it was removed from the draft
    /// - A stale id held by the review form after a re-normalization
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Payment amount is invalid.
    ///
    /// Raised when projecting a payment-link request from an invoice whose
    /// total is not strictly positive (the payment provider rejects zero
    /// and negative amounts).
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when the extraction payload or a draft under review
/// does not meet requirements. All of them are recoverable by prompting the
/// user for the missing data.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The extraction payload carries no usable sender or recipient name.
    #[error("missing sender or recipient")]
    MissingParty,

    /// The invoice has no line items; it cannot be normalized or finalized.
    #[error("invoice has no line items")]
    EmptyLineItems,

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineItemNotFound("li-42".to_string());
        assert_eq!(err.to_string(), "Line item not found: li-42");

        let err = CoreError::InvalidPaymentAmount {
            reason: "total must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid payment amount: total must be greater than zero"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "fromName".to_string(),
        };
        assert_eq!(err.to_string(), "fromName is required");

        assert_eq!(
            ValidationError::MissingParty.to_string(),
            "missing sender or recipient"
        );
        assert_eq!(
            ValidationError::EmptyLineItems.to_string(),
            "invoice has no line items"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyLineItems;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
