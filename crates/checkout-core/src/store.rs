//! # Checkout Store
//!
//! The catalog and basket registry contract the checkout service consumes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutService ──► CheckoutStore (this trait)                         │
//! │                          ▲                                              │
//! │                          │ implemented by                               │
//! │                          │                                              │
//! │            checkout-datasource::InMemoryDatasource                      │
//! │            (JSON catalog + concurrent basket registry)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog lookups hand out references: products and promotions are loaded
//! once and never change. Baskets are shared as `Arc<Basket>` so a caller can
//! keep using a basket after releasing the registry lock.

use std::sync::Arc;

use crate::basket::Basket;
use crate::error::CoreResult;
use crate::promotion::{Promotion, PromotionType};
use crate::types::Product;

/// Catalog lookups and basket storage.
pub trait CheckoutStore: Send + Sync {
    /// Fails with `ProductNotFound`.
    fn get_product(&self, code: &str) -> CoreResult<&Product>;

    /// Fails with `PromotionNotFound`.
    fn get_promotion(&self, promotion_type: PromotionType) -> CoreResult<&Promotion>;

    /// Active promotions, in the order they are applied.
    fn get_promotions(&self) -> &[Promotion];

    /// Fails with `BasketNotFound`.
    fn get_basket(&self, id: &str) -> CoreResult<Arc<Basket>>;

    /// Registers a fully built basket. Fails with `PrimaryKey` if the id is taken.
    fn add_basket(&self, basket: Basket) -> CoreResult<Arc<Basket>>;

    /// Removes a basket. Unknown ids are ignored.
    fn delete_basket(&self, id: &str);

    fn basket_count(&self) -> usize;
}
