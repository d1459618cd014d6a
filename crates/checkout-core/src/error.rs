//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Lookup, configuration and conflict failures    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout-datasource errors (separate crate)                           │
//! │  └── DatasourceError  - File, JSON and TOML failures                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DatasourceError → caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! Every [`CoreError`] falls in one of three [`ErrorKind`]s. The surrounding
//! service maps them onto its own status codes (404 / 400 / 409 over HTTP).

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing product, promotion or basket.
    NotFound,
    /// Malformed promotion configuration or invalid product.
    Invalid,
    /// Duplicate basket id on creation.
    Conflict,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All of them are terminal for the operation that raised them and are
/// surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product code is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Promotion type tag is not recognized, or not loaded.
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Basket id is not registered.
    #[error("Basket not found: {0}")]
    BasketNotFound(String),

    /// Promotion definition is structurally invalid.
    ///
    /// ## When This Occurs
    /// - No product survived parsing ("empty items list")
    /// - A product is listed with no rules
    #[error("Promotion {code} invalid: {reason}")]
    PromotionInvalid { code: String, reason: String },

    /// A basket with the same id already exists.
    #[error("Primary key already exists: {0}")]
    PrimaryKey(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a PromotionInvalid error.
    pub fn promotion_invalid(code: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::PromotionInvalid {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ProductNotFound(_)
            | CoreError::PromotionNotFound(_)
            | CoreError::BasketNotFound(_) => ErrorKind::NotFound,
            CoreError::PromotionInvalid { .. } | CoreError::Validation(_) => ErrorKind::Invalid,
            CoreError::PrimaryKey(_) => ErrorKind::Conflict,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state changes, so a failed validation never leaves a
/// basket or a rule half-built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
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
        let err = CoreError::promotion_invalid("BULK", "empty items list");
        assert_eq!(err.to_string(), "Promotion BULK invalid: empty items list");

        let err = CoreError::PrimaryKey("abc".to_string());
        assert_eq!(err.to_string(), "Primary key already exists: abc");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::OutOfRange {
            field: "free".to_string(),
            min: 0,
            max: 3,
        };
        assert_eq!(err.to_string(), "free must be between 0 and 3");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CoreError::ProductNotFound("P1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::PromotionNotFound("X".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::BasketNotFound("b".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::promotion_invalid("BULK", "bad").kind(),
            ErrorKind::Invalid
        );
        assert_eq!(CoreError::PrimaryKey("b".into()).kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "buy".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::Invalid);
    }
}
