//! # In-Memory Datasource
//!
//! The [`CheckoutStore`] used at runtime: a shared read-only [`Catalog`]
//! plus a [`BasketRegistry`] living for the lifetime of the process.

use std::sync::Arc;

use checkout_core::{Basket, CheckoutStore, CoreResult, Product, Promotion, PromotionType};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::DatasourceConfig;
use crate::error::DsResult;
use crate::registry::BasketRegistry;

#[derive(Debug)]
pub struct InMemoryDatasource {
    catalog: Arc<Catalog>,
    baskets: BasketRegistry,
}

impl InMemoryDatasource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        InMemoryDatasource {
            catalog,
            baskets: BasketRegistry::new(),
        }
    }

    /// Loads the catalog files named by `config`.
    pub fn load(config: &DatasourceConfig) -> DsResult<Self> {
        let catalog = Catalog::load(config)?;
        info!("Datasource ready");
        Ok(Self::new(Arc::new(catalog)))
    }
}

impl CheckoutStore for InMemoryDatasource {
    fn get_product(&self, code: &str) -> CoreResult<&Product> {
        self.catalog.product(code)
    }

    fn get_promotion(&self, promotion_type: PromotionType) -> CoreResult<&Promotion> {
        self.catalog.promotion(promotion_type)
    }

    fn get_promotions(&self) -> &[Promotion] {
        self.catalog.promotions()
    }

    fn get_basket(&self, id: &str) -> CoreResult<Arc<Basket>> {
        self.baskets.get(id)
    }

    fn add_basket(&self, basket: Basket) -> CoreResult<Arc<Basket>> {
        self.baskets.insert(basket)
    }

    fn delete_basket(&self, id: &str) {
        self.baskets.remove(id);
    }

    fn basket_count(&self) -> usize {
        self.baskets.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
