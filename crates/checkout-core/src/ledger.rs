//! # Claims Ledger
//!
//! Records, per product code, every unit a promotion has claimed and the price
//! it tagged that unit with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ClaimsLedger::new()                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BULK.resolve(lines, ledger) ──► ledger { PEN: [820, 820, 820] }        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FREE_ITEMS.resolve(lines, ledger) ──► ledger { PEN: [...],             │
//! │                                                 VOUCHER: [0, 500] }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregator: Σ ledger prices + unclaimed units × full price            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A ledger lives for one price computation only. It is moved into each
//! `resolve` call and handed back, so the "already claimed" dependency between
//! promotions is visible in every signature.

use std::collections::HashMap;

use crate::money::Money;
use crate::types::ProductCode;

/// Per-unit prices claimed by promotions, keyed by product code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsLedger {
    claims: HashMap<ProductCode, Vec<Money>>,
}

impl ClaimsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units of `code` already claimed.
    pub fn claimed(&self, code: &str) -> i64 {
        self.claims.get(code).map_or(0, |prices| prices.len() as i64)
    }

    /// Claimed unit prices for `code`, in claim order.
    pub fn prices(&self, code: &str) -> &[Money] {
        self.claims.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    /// Sum of the claimed unit prices for `code`.
    pub fn claimed_total(&self, code: &str) -> Money {
        self.prices(code).iter().sum()
    }

    /// Appends claimed units for `code`. Existing claims are never touched.
    pub fn claim(&mut self, code: &ProductCode, prices: impl IntoIterator<Item = Money>) {
        self.claims.entry(code.clone()).or_default().extend(prices);
    }

    /// Total number of claimed units across all codes.
    pub fn total_claimed_units(&self) -> usize {
        self.claims.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_claimed_units() == 0
    }
}
