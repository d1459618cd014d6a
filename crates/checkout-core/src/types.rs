//! # Domain Types
//!
//! Catalog and basket-line types used throughout the checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │      Line       │                        │
//! │  │  ─────────────  │◄───────│  ─────────────  │                        │
//! │  │  code           │        │  product        │                        │
//! │  │  name           │        │  amount         │                        │
//! │  │  price_cents    │        └─────────────────┘                        │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Lines = BTreeMap<ProductCode, Line>  (one line per product code)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use crate::money::Money;

// =============================================================================
// Product Code
// =============================================================================

/// Opaque catalog identifier of a product (e.g. `VOUCHER`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(code: impl Into<String>) -> Self {
        ProductCode(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ProductCode {
    fn from(code: &str) -> Self {
        ProductCode::new(code)
    }
}

impl From<String> for ProductCode {
    fn from(code: String) -> Self {
        ProductCode(code)
    }
}

/// Lets maps keyed by `ProductCode` be queried with a plain `&str`.
impl Borrow<str> for ProductCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub code: ProductCode,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit).
    #[serde(rename = "price")]
    pub price_cents: i64,
}

impl Product {
    pub fn new(code: impl Into<ProductCode>, name: impl Into<String>, price_cents: i64) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price_cents,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Line
// =============================================================================

/// All units of one product code inside a basket.
///
/// `amount` is the true purchased quantity. Promotion resolution reads it but
/// never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub product: Product,
    pub amount: i64,
}

impl Line {
    pub fn new(product: Product, amount: i64) -> Self {
        Line { product, amount }
    }

    #[inline]
    pub fn code(&self) -> &ProductCode {
        &self.product.code
    }

    /// Line total with no promotion applied.
    pub fn full_price(&self) -> Money {
        self.product.price().multiply_quantity(self.amount)
    }
}

/// Basket contents keyed by product code.
///
/// A `BTreeMap` keeps iteration (and therefore logs and breakdowns)
/// deterministic.
pub type Lines = BTreeMap<ProductCode, Line>;

// =============================================================================
// Unit Tests
// =============================================================================
