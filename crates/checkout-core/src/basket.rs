//! # Basket
//!
//! A shopping basket and its promotion-aware price computation.
//!
//! ## Thread Safety
//! Each basket owns one `RwLock` over its lines:
//! 1. `add_product` takes the write lock (the only mutation)
//! 2. price computation takes the read lock: it builds a fresh claims
//!    ledger and never writes basket state, so concurrent price reads
//!    don't block each other
//!
//! ## Price Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_price(promotions)                          │
//! │                                                                         │
//! │  read lock ──► ClaimsLedger::new()                                      │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │      promotions[0].resolve ──► promotions[1].resolve ──► ...            │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  per line: Σ claimed prices + (amount − claimed) × full price           │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  total cents ──► Decimal (24.60)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::error::CoreResult;
use crate::money::Money;
use crate::promotion::{resolve_all, Promotion};
use crate::types::{Line, Lines, Product, ProductCode};
use crate::validation::{validate_line, validate_product};

// =============================================================================
// Price Breakdown
// =============================================================================

/// Price detail of one basket line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePrice {
    pub code: ProductCode,
    pub name: String,
    /// Full unit price of the product.
    pub unit_price: Money,
    pub amount: i64,
    /// Units priced by a promotion.
    pub claimed: i64,
    /// Sum of the promotional unit prices.
    pub promotional: Money,
    /// Unclaimed units at the product's full price.
    pub full_price: Money,
    pub total: Money,
}

/// Per-line detail of a basket price computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub basket_id: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<LinePrice>,
    pub total: Money,
}

impl PriceBreakdown {
    /// Total converted to major units for display.
    pub fn total_major_units(&self) -> Decimal {
        self.total.to_major_units()
    }

    /// What the basket would cost with no promotion at all.
    pub fn undiscounted(&self) -> Money {
        self.lines
            .iter()
            .map(|line| line.unit_price.multiply_quantity(line.amount))
            .sum()
    }

    /// Amount saved by promotions.
    pub fn savings(&self) -> Money {
        self.undiscounted() - self.total
    }
}

// =============================================================================
// Basket
// =============================================================================

/// A shopping basket.
///
/// ## Invariants
/// - Lines are unique by product code (adding the same product increments)
/// - `amount` is always the true purchased quantity
#[derive(Debug)]
pub struct Basket {
    id: String,
    created_at: DateTime<Utc>,
    lines: RwLock<Lines>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new(id: impl Into<String>) -> Self {
        Basket {
            id: id.into(),
            created_at: Utc::now(),
            lines: RwLock::new(Lines::new()),
        }
    }

    /// Creates a basket pre-filled with `lines`.
    ///
    /// Every line must hold a valid product and an `amount` of at least one,
    /// otherwise a `Validation` error is returned and no basket is built.
    /// A later line for the same product code replaces an earlier one.
    pub fn with_lines(
        id: impl Into<String>,
        lines: impl IntoIterator<Item = Line>,
    ) -> CoreResult<Self> {
        let lines = lines
            .into_iter()
            .map(|line| {
                validate_line(&line)?;
                Ok((line.code().clone(), line))
            })
            .collect::<CoreResult<Lines>>()?;

        Ok(Basket {
            lines: RwLock::new(lines),
            ..Basket::new(id)
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Invalid product (negative price, empty code): `Validation` error,
    ///   basket untouched
    /// - Product already in basket: its `amount` grows by one
    /// - Otherwise: new line with `amount = 1`
    ///
    /// Only the quantity changes on an existing line; the product attributes
    /// stored with it are kept as first added.
    pub fn add_product(&self, product: &Product) -> CoreResult<()> {
        validate_product(product)?;

        let mut lines = self.write_lines();
        let amount = match lines.get_mut(product.code.as_str()) {
            Some(line) => {
                line.amount += 1;
                line.amount
            }
            None => {
                lines.insert(product.code.clone(), Line::new(product.clone(), 1));
                1
            }
        };

        debug!(basket_id = %self.id, code = %product.code, amount, "Product added to basket");
        Ok(())
    }

    /// Computes the per-line price detail under `promotions`, applied in order.
    pub fn price_breakdown(&self, promotions: &[Promotion]) -> PriceBreakdown {
        let lines = self.read_lines();
        let ledger = resolve_all(promotions, &lines);

        let lines: Vec<LinePrice> = lines
            .values()
            .map(|line| {
                let code = line.code().as_str();
                let claimed = ledger.claimed(code);
                let promotional = ledger.claimed_total(code);
                let full_price = line.product.price().multiply_quantity(line.amount - claimed);

                LinePrice {
                    code: line.code().clone(),
                    name: line.product.name.clone(),
                    unit_price: line.product.price(),
                    amount: line.amount,
                    claimed,
                    promotional,
                    full_price,
                    total: promotional + full_price,
                }
            })
            .collect();

        let total: Money = lines.iter().map(|line| line.total).sum();

        debug!(
            basket_id = %self.id,
            promotions = promotions.len(),
            claimed_units = ledger.total_claimed_units(),
            total_cents = total.cents(),
            "Basket price calculated"
        );

        PriceBreakdown {
            basket_id: self.id.clone(),
            created_at: self.created_at,
            lines,
            total,
        }
    }

    /// Grand total in minor units.
    pub fn calculate_total(&self, promotions: &[Promotion]) -> Money {
        self.price_breakdown(promotions).total
    }

    /// Grand total in major units (e.g. `24.60`), recomputed on every call.
    pub fn calculate_price(&self, promotions: &[Promotion]) -> Decimal {
        self.calculate_total(promotions).to_major_units()
    }

    /// Snapshot of the lines, ordered by product code.
    pub fn lines(&self) -> Vec<Line> {
        self.read_lines().values().cloned().collect()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.read_lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lines().is_empty()
    }

    // Every mutation is a single insert or increment, so a panicking holder
    // cannot leave the map half-updated; recover the guard instead of panicking.
    fn read_lines(&self) -> RwLockReadGuard<'_, Lines> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self) -> RwLockWriteGuard<'_, Lines> {
        self.lines.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
