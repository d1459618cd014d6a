//! # Validation Module
//!
//! Input validation for catalog entries and promotion rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog loader (checkout-datasource)                         │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── Skips malformed promotion rules, logs them                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Rule constructors (buy > 0, 0 <= free <= buy, price >= 0)         │
//! │  ├── Basket::add_product (0 <= price <= cap, code present)             │
//! │  └── Basket::with_lines (valid product, amount >= 1)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_price_cents, validate_buy};
//!
//! assert!(validate_price_cents(0).is_ok());
//! assert!(validate_buy(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Line, Product, ProductCode};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest accepted unit price: 100,000,000.00 in major units.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product code: must not be empty or blank.
pub fn validate_product_code(code: &ProductCode) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE_CENTS`]
///
/// ```rust
/// use checkout_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a whole product before it enters a basket or the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_code(&product.code)?;
    validate_price_cents(product.price_cents)
}

/// Validates a pre-built basket line: a valid product bought at least once.
pub fn validate_line(line: &Line) -> ValidationResult<()> {
    validate_product(&line.product)?;

    if line.amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Offer Rule Validators
// =============================================================================

/// Validates the "buy N" threshold of an offer rule.
pub fn validate_buy(buy: i64) -> ValidationResult<()> {
    if buy <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "buy".to_string(),
        });
    }

    Ok(())
}

/// Validates the free-unit count of a "buy N get F free" rule.
///
/// `free` may be zero (the rule then claims units at full price) and may equal
/// `buy` (the whole group is free).
pub fn validate_free(buy: i64, free: i64) -> ValidationResult<()> {
    validate_buy(buy)?;

    if !(0..=buy).contains(&free) {
        return Err(ValidationError::OutOfRange {
            field: "free".to_string(),
            min: 0,
            max: buy,
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
    fn test_validate_product() {
        assert!(validate_product(&Product::new("P1", "Product 1", 800)).is_ok());
        assert!(validate_product(&Product::new("P1", "Free sample", 0)).is_ok());

        assert_eq!(
            validate_product(&Product::new("P1", "Product 1", -10)),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            })
        );
        assert!(validate_product(&Product::new("P1", "Top price", MAX_PRICE_CENTS)).is_ok());
        assert!(validate_product(&Product::new("P1", "Too dear", MAX_PRICE_CENTS + 1)).is_err());
        assert!(matches!(
            validate_product(&Product::new("", "No code", 100)),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_line() {
        let product = Product::new("P1", "Product 1", 800);

        assert!(validate_line(&Line::new(product.clone(), 1)).is_ok());
        assert_eq!(
            validate_line(&Line::new(product.clone(), 0)),
            Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            })
        );
        assert!(validate_line(&Line::new(product, -3)).is_err());
        assert!(matches!(
            validate_line(&Line::new(Product::new("P1", "Product 1", -10), 2)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_buy() {
        assert!(validate_buy(1).is_ok());
        assert!(validate_buy(5).is_ok());
        assert!(validate_buy(0).is_err());
        assert!(validate_buy(-5).is_err());
    }

    #[test]
    fn test_validate_free() {
        assert!(validate_free(3, 0).is_ok());
        assert!(validate_free(3, 1).is_ok());
        assert!(validate_free(3, 3).is_ok());

        assert!(validate_free(3, -1).is_err());
        assert!(validate_free(3, 4).is_err());
        assert!(validate_free(0, 0).is_err());
    }
}
