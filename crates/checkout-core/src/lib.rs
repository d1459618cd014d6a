//! # checkout-core: Pure Pricing Logic
//!
//! This crate is the **heart** of the checkout. It prices shopping baskets
//! under a catalog of promotions, as pure functions over in-memory data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              API layer (HTTP, CLI, ... not in this crate)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  service  │  │  basket   │  │ promotion │  │  ledger   │  │   │
//! │  │   │ Checkout  │  │  Basket   │  │   BULK    │  │  Claims   │  │   │
//! │  │   │ Service   │  │  Lines    │  │FREE_ITEMS │  │  Ledger   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CheckoutStore                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           checkout-datasource (catalog + basket registry)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Line
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`promotion`] - Promotion variants and the claim algorithm
//! - [`ledger`] - Per-unit claims threaded through promotions
//! - [`basket`] - Basket, locking and price aggregation
//! - [`store`] - Catalog/registry contract
//! - [`service`] - Basket operations for the API layer
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Basket, BulkOfferRule, BulkPromotion, OfferBook, Product, Promotion};
//!
//! let basket = Basket::new("basket-1");
//! let pen = Product::new("PEN", "Ballpoint Pen", 1000);
//! for _ in 0..3 {
//!     basket.add_product(&pen).unwrap();
//! }
//!
//! let bulk = BulkPromotion::new(OfferBook::from_iter([
//!     ("PEN", vec![BulkOfferRule::new(3, 820).unwrap()]),
//! ]))
//! .unwrap();
//!
//! let price = basket.calculate_price(&[Promotion::from(bulk)]);
//! assert_eq!(price.to_string(), "24.60");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod error;
pub mod ledger;
pub mod money;
pub mod promotion;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, LinePrice, PriceBreakdown};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use ledger::ClaimsLedger;
pub use money::Money;
pub use promotion::{
    BulkOfferRule, BulkPromotion, FreeItemsOfferRule, FreeItemsPromotion, OfferBook, OfferRule,
    Promotion, PromotionType,
};
pub use service::CheckoutService;
pub use store::CheckoutStore;
pub use types::*;
