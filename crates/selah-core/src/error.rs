//! # Error Types
//!
//! Domain-specific error types for selah-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  selah-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog/line failures (skip the line)           │
//! │  ├── CommitError      - Commit gate failures (block the commit)         │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  selah-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  Register errors (in app)                                               │
//! │  └── AppError         - What the cashier sees                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Numeric parse failures are NOT errors; they absorb to zero defaults
//!    (see the money module); only `CommitError` is allowed to block the
//!    irreversible action

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and line-level errors.
///
/// These are recoverable: the front end reports them and the offending line
/// is simply not added. The form always stays editable.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Sale has reached the line-count ceiling.
    #[error("Sale cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Commit Error
// =============================================================================

/// Commit gate failures.
///
/// The only errors in the system allowed to block forward progress: every
/// other numeric problem degrades to a safe default, but committing an
/// empty or underpaid sale must be refused outright.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The subtotal over valid lines is exactly zero.
    #[error("No items to register")]
    NoItems,

    /// Cash payment on a non-loan sale does not cover the total.
    #[error("Insufficient payment: tendered {tendered}, total {total}")]
    InsufficientPayment { tendered: Money, total: Money },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used on the strict paths (client registration, product insertion) where
/// rejecting bad input is correct. Sale-line numeric fields deliberately do
/// NOT go through these; they use the permissive parsers instead.
#[derive(Debug, Error)]
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

    /// Invalid format (e.g., non-numeric product id).
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
        let err = CoreError::ProductNotFound("9999".to_string());
        assert_eq!(err.to_string(), "Product not found: 9999");

        let err = CommitError::InsufficientPayment {
            tendered: Money::from_cents(5000),
            total: Money::from_cents(6250),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: tendered $50.00, total $62.50"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
