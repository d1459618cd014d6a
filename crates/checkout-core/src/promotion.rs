//! # Promotions
//!
//! Promotion variants and the greedy, order-sensitive resolution algorithm
//! that claims basket units for them.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For every product code offered AND present in the basket:             │
//! │                                                                         │
//! │    remaining = line.amount − ledger.claimed(code)                       │
//! │                                                                         │
//! │    for rule in rules (list order = priority):                           │
//! │        groups   = remaining / rule.buy                                  │
//! │        consumed = groups × rule.buy                                     │
//! │        ledger[code] += consumed priced units                            │
//! │        remaining −= consumed                                            │
//! │                                                                         │
//! │  Example, remaining = 7:                                               │
//! │    [buy 5, buy 2] → 5 + 2 = 7 claimed                                   │
//! │    [buy 2, buy 5] → 6 claimed, 1 left (too few for a group of 5)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rule order is a configuration lever: it is never sorted or optimized.
//!
//! ## Unit Pricing
//! - [`BulkOfferRule`]: every claimed unit costs the rule's `unit_price`.
//! - [`FreeItemsOfferRule`]: inside each claimed group of `buy` units, the first
//!   `free` are priced 0 and the rest at the product's full price.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::ledger::ClaimsLedger;
use crate::money::Money;
use crate::types::{Lines, ProductCode};
use crate::validation::{validate_buy, validate_free, validate_price_cents};

// =============================================================================
// Promotion Type
// =============================================================================

/// Type tag of a promotion, as written in the promotions file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    /// Discounted unit price when buying N or more.
    Bulk,
    /// Buy N, get F of them free.
    FreeItems,
}

impl PromotionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PromotionType::Bulk => "BULK",
            PromotionType::FreeItems => "FREE_ITEMS",
        }
    }
}

impl fmt::Display for PromotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BULK" => Ok(PromotionType::Bulk),
            "FREE_ITEMS" => Ok(PromotionType::FreeItems),
            other => Err(CoreError::PromotionNotFound(other.to_string())),
        }
    }
}

// =============================================================================
// Offer Rules
// =============================================================================

/// The shape shared by every offer rule: a group size and a way to price the
/// units of a claimed group.
pub trait OfferRule {
    /// Group size ("buy N"). Always positive.
    fn buy(&self) -> i64;

    /// Price of the unit at `position` (0-based, `< buy`) inside a claimed group.
    fn unit_price(&self, position: i64, full_price: Money) -> Money;
}

/// "Buy `buy` or more and pay `unit_price` per unit."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOfferRule {
    buy: i64,
    unit_price: Money,
}

impl BulkOfferRule {
    /// Creates a rule, rejecting `buy <= 0` and negative prices.
    pub fn new(buy: i64, unit_price_cents: i64) -> CoreResult<Self> {
        validate_buy(buy)?;
        validate_price_cents(unit_price_cents)?;

        Ok(BulkOfferRule {
            buy,
            unit_price: Money::from_cents(unit_price_cents),
        })
    }
}

impl OfferRule for BulkOfferRule {
    fn buy(&self) -> i64 {
        self.buy
    }

    fn unit_price(&self, _position: i64, _full_price: Money) -> Money {
        self.unit_price
    }
}

/// "Buy `buy`, get `free` of them for nothing."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeItemsOfferRule {
    buy: i64,
    free: i64,
}

impl FreeItemsOfferRule {
    /// Creates a rule, rejecting `buy <= 0` and `free` outside `0..=buy`.
    pub fn new(buy: i64, free: i64) -> CoreResult<Self> {
        validate_free(buy, free)?;
        Ok(FreeItemsOfferRule { buy, free })
    }
}

impl OfferRule for FreeItemsOfferRule {
    fn buy(&self) -> i64 {
        self.buy
    }

    fn unit_price(&self, position: i64, full_price: Money) -> Money {
        if position < self.free {
            Money::zero()
        } else {
            full_price
        }
    }
}

// =============================================================================
// Offer Book
// =============================================================================

/// Ordered offer rules per product code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferBook<R> {
    offers: BTreeMap<ProductCode, Vec<R>>,
}

impl<R> Default for OfferBook<R> {
    fn default() -> Self {
        OfferBook {
            offers: BTreeMap::new(),
        }
    }
}

impl<R> OfferBook<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule list for `code`, returning the list it replaces.
    pub fn insert(&mut self, code: impl Into<ProductCode>, rules: Vec<R>) -> Option<Vec<R>> {
        self.offers.insert(code.into(), rules)
    }

    pub fn rules_for(&self, code: &str) -> Option<&[R]> {
        self.offers.get(code).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductCode, &[R])> {
        self.offers
            .iter()
            .map(|(code, rules)| (code, rules.as_slice()))
    }

    fn validate(&self, promotion_type: PromotionType) -> CoreResult<()> {
        if self.offers.is_empty() {
            return Err(CoreError::promotion_invalid(
                promotion_type.as_str(),
                "empty items list",
            ));
        }

        if let Some((code, _)) = self.offers.iter().find(|(_, rules)| rules.is_empty()) {
            return Err(CoreError::promotion_invalid(
                promotion_type.as_str(),
                format!("no rules for product {}", code),
            ));
        }

        Ok(())
    }
}

impl<R, C: Into<ProductCode>> FromIterator<(C, Vec<R>)> for OfferBook<R> {
    fn from_iter<I: IntoIterator<Item = (C, Vec<R>)>>(iter: I) -> Self {
        OfferBook {
            offers: iter
                .into_iter()
                .map(|(code, rules)| (code.into(), rules))
                .collect(),
        }
    }
}

/// Greedy claim loop shared by every promotion variant.
fn claim_offers<R: OfferRule>(
    promotion_type: PromotionType,
    offers: &OfferBook<R>,
    lines: &Lines,
    mut ledger: ClaimsLedger,
) -> ClaimsLedger {
    for (code, rules) in offers.iter() {
        let Some(line) = lines.get(code.as_str()) else {
            continue;
        };

        let full_price = line.product.price();
        let mut remaining = line.amount - ledger.claimed(code.as_str());

        for rule in rules {
            let buy = rule.buy();
            let groups = remaining / buy;
            if groups <= 0 {
                continue;
            }

            let consumed = groups * buy;
            ledger.claim(
                code,
                (0..consumed).map(|i| rule.unit_price(i % buy, full_price)),
            );
            remaining -= consumed;

            debug!(
                promotion = %promotion_type,
                code = %code,
                buy,
                groups,
                consumed,
                remaining,
                "Offer rule claimed units"
            );
        }
    }

    ledger
}

// =============================================================================
// Promotion Variants
// =============================================================================

/// Discounted unit price for groups of `buy` units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPromotion {
    offers: OfferBook<BulkOfferRule>,
}

impl BulkPromotion {
    /// Fails with `PromotionInvalid` when no product is offered or a product
    /// has no rules.
    pub fn new(offers: OfferBook<BulkOfferRule>) -> CoreResult<Self> {
        offers.validate(PromotionType::Bulk)?;
        Ok(BulkPromotion { offers })
    }

    pub fn offers(&self) -> &OfferBook<BulkOfferRule> {
        &self.offers
    }

    /// Claims eligible units at the rule's unit price.
    pub fn resolve(&self, lines: &Lines, ledger: ClaimsLedger) -> ClaimsLedger {
        claim_offers(PromotionType::Bulk, &self.offers, lines, ledger)
    }
}

/// Free units inside groups of `buy` units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeItemsPromotion {
    offers: OfferBook<FreeItemsOfferRule>,
}

impl FreeItemsPromotion {
    /// Fails with `PromotionInvalid` when no product is offered or a product
    /// has no rules.
    pub fn new(offers: OfferBook<FreeItemsOfferRule>) -> CoreResult<Self> {
        offers.validate(PromotionType::FreeItems)?;
        Ok(FreeItemsPromotion { offers })
    }

    pub fn offers(&self) -> &OfferBook<FreeItemsOfferRule> {
        &self.offers
    }

    /// Claims eligible units, the first `free` of every group at zero.
    pub fn resolve(&self, lines: &Lines, ledger: ClaimsLedger) -> ClaimsLedger {
        claim_offers(PromotionType::FreeItems, &self.offers, lines, ledger)
    }
}

/// A loaded promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    Bulk(BulkPromotion),
    FreeItems(FreeItemsPromotion),
}

impl Promotion {
    pub fn promotion_type(&self) -> PromotionType {
        match self {
            Promotion::Bulk(_) => PromotionType::Bulk,
            Promotion::FreeItems(_) => PromotionType::FreeItems,
        }
    }

    /// Claims units of `lines` not already present in `ledger` and returns the
    /// extended ledger.
    pub fn resolve(&self, lines: &Lines, ledger: ClaimsLedger) -> ClaimsLedger {
        match self {
            Promotion::Bulk(promotion) => promotion.resolve(lines, ledger),
            Promotion::FreeItems(promotion) => promotion.resolve(lines, ledger),
        }
    }
}

impl From<BulkPromotion> for Promotion {
    fn from(promotion: BulkPromotion) -> Self {
        Promotion::Bulk(promotion)
    }
}

impl From<FreeItemsPromotion> for Promotion {
    fn from(promotion: FreeItemsPromotion) -> Self {
        Promotion::FreeItems(promotion)
    }
}

/// Runs every promotion in order against one shared ledger.
pub fn resolve_all(promotions: &[Promotion], lines: &Lines) -> ClaimsLedger {
    promotions
        .iter()
        .fold(ClaimsLedger::new(), |ledger, promotion| {
            promotion.resolve(lines, ledger)
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
