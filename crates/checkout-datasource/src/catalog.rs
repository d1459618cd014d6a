//! # Catalog
//!
//! Products and promotions, loaded once at startup and read-only afterwards.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.json ──► Vec<Product> ──► validate each ──► HashMap by code   │
//! │                     (bad JSON or invalid product aborts the load)       │
//! │                                                                         │
//! │  promotions.json ─► Vec<Value> ──► parse_promotion ──► Vec<Promotion>   │
//! │                     (bad JSON aborts; a bad entry is logged + skipped)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Promotions keep file order: that is the order they claim basket units in.

use std::collections::HashMap;
use std::path::Path;

use checkout_core::validation::validate_product;
use checkout_core::{CoreError, CoreResult, Product, ProductCode, Promotion, PromotionType};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::DatasourceConfig;
use crate::error::{DatasourceError, DsResult};
use crate::parser::parse_promotion;

/// Immutable product and promotion lookup.
#[derive(Debug, Default)]
pub struct Catalog {
    products: HashMap<ProductCode, Product>,
    promotions: Vec<Promotion>,
}

impl Catalog {
    /// Builds a catalog from already parsed parts.
    ///
    /// Fails with `Validation` on the first invalid product. A repeated
    /// product code replaces the earlier entry; a repeated promotion type
    /// replaces the earlier promotion in place.
    pub fn new(
        products: impl IntoIterator<Item = Product>,
        promotions: impl IntoIterator<Item = Promotion>,
    ) -> CoreResult<Self> {
        let mut catalog = Catalog::default();

        for product in products {
            validate_product(&product)?;
            if let Some(previous) = catalog.products.insert(product.code.clone(), product) {
                warn!(code = %previous.code, "Duplicate product code, keeping the later entry");
            }
        }

        for promotion in promotions {
            catalog.add_promotion(promotion);
        }

        Ok(catalog)
    }

    /// Reads both catalog files named by `config`.
    pub fn load(config: &DatasourceConfig) -> DsResult<Self> {
        let products = read_file(config.products_path())?;
        let promotions = read_file(config.promotions_path())?;

        let catalog = Self::from_json_str(&products, &promotions)?;

        info!(
            products = catalog.product_count(),
            promotions = catalog.promotion_count(),
            products_path = ?config.products_path(),
            promotions_path = ?config.promotions_path(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from the JSON text of both files.
    pub fn from_json_str(products_json: &str, promotions_json: &str) -> DsResult<Self> {
        let products: Vec<Product> = serde_json::from_str(products_json)?;
        let nodes: Vec<Value> = serde_json::from_str(promotions_json)?;

        let promotions = nodes.iter().filter_map(|node| match parse_promotion(node) {
            Ok(promotion) => Some(promotion),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Skipping promotion");
                None
            }
        });

        Ok(Self::new(products, promotions)?)
    }

    fn add_promotion(&mut self, promotion: Promotion) {
        let promotion_type = promotion.promotion_type();

        match self
            .promotions
            .iter_mut()
            .find(|p| p.promotion_type() == promotion_type)
        {
            Some(existing) => {
                warn!(promotion = %promotion_type, "Duplicate promotion type, replacing earlier definition");
                *existing = promotion;
            }
            None => {
                debug!(promotion = %promotion_type, "Promotion registered");
                self.promotions.push(promotion);
            }
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn product(&self, code: &str) -> CoreResult<&Product> {
        self.products
            .get(code)
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))
    }

    pub fn promotion(&self, promotion_type: PromotionType) -> CoreResult<&Promotion> {
        self.promotions
            .iter()
            .find(|p| p.promotion_type() == promotion_type)
            .ok_or_else(|| CoreError::PromotionNotFound(promotion_type.to_string()))
    }

    /// Active promotions in application order.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn promotion_count(&self) -> usize {
        self.promotions.len()
    }
}

fn read_file(path: &Path) -> DsResult<String> {
    std::fs::read_to_string(path).map_err(|e| DatasourceError::io(path, e))
}

// =============================================================================
// Unit Tests
// =============================================================================
