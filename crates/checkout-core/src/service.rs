//! # Checkout Service
//!
//! Basket operations exposed to the API layer.
//!
//! ## Basket Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐      ┌──────────┐      ┌──────────┐      ┌──────────┐    │
//! │  │  create  │─────►│   add    │─────►│  price   │─────►│  delete  │    │
//! │  │  basket  │      │ products │      │  basket  │      │  basket  │    │
//! │  └──────────┘      └──────────┘      └──────────┘      └──────────┘    │
//! │                         ▲                 │                             │
//! │                         └─────────────────┘                             │
//! │                    (price any number of times)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::basket::{Basket, PriceBreakdown};
use crate::error::CoreResult;
use crate::store::CheckoutStore;

/// Checkout operations over a [`CheckoutStore`].
#[derive(Debug)]
pub struct CheckoutService<S> {
    store: S,
}

impl<S: CheckoutStore> CheckoutService<S> {
    pub fn new(store: S) -> Self {
        CheckoutService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an empty basket and returns its id (UUID v4).
    ///
    /// An id collision surfaces as `PrimaryKey`; it is not retried.
    pub fn create_basket(&self) -> CoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.store.add_basket(Basket::new(id.clone()))?;

        info!(basket_id = %id, "Basket created");
        Ok(id)
    }

    /// Adds one unit of a catalog product to a basket.
    ///
    /// Fails with `ProductNotFound`, `BasketNotFound`, or `Validation`.
    pub fn add_product_to_basket(&self, basket_id: &str, product_code: &str) -> CoreResult<()> {
        let product = self.store.get_product(product_code)?;
        let basket = self.store.get_basket(basket_id)?;

        basket.add_product(product)
    }

    /// Current basket total in major units, under every active promotion.
    pub fn get_basket_price(&self, basket_id: &str) -> CoreResult<Decimal> {
        let basket = self.store.get_basket(basket_id)?;
        let price = basket.calculate_price(self.store.get_promotions());

        debug!(basket_id, %price, "Basket priced");
        Ok(price)
    }

    /// Per-line price detail, under every active promotion.
    pub fn get_basket_breakdown(&self, basket_id: &str) -> CoreResult<PriceBreakdown> {
        let basket = self.store.get_basket(basket_id)?;
        Ok(basket.price_breakdown(self.store.get_promotions()))
    }

    /// Removes a basket. Unknown ids are ignored.
    pub fn delete_basket(&self, basket_id: &str) {
        self.store.delete_basket(basket_id);
        info!(basket_id, "Basket deleted");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    use crate::error::CoreError;
    use crate::promotion::{
        BulkOfferRule, BulkPromotion, FreeItemsOfferRule, FreeItemsPromotion, OfferBook,
        Promotion, PromotionType,
    };
    use crate::types::Product;

    /// Minimal store: fixed catalog, baskets in a locked map.
    struct TestStore {
        products: HashMap<String, Product>,
        promotions: Vec<Promotion>,
        baskets: RwLock<HashMap<String, Arc<Basket>>>,
    }

    impl TestStore {
        fn new() -> Self {
            let products = [
                Product::new("PEN", "Ballpoint Pen", 1000),
                Product::new("VOUCHER", "Gift Voucher", 1200),
                Product::new("MUG", "Coffee Mug", 750),
            ]
            .into_iter()
            .map(|p| (p.code.to_string(), p))
            .collect();

            let bulk = BulkPromotion::new(OfferBook::from_iter([(
                "PEN",
                vec![BulkOfferRule::new(3, 820).unwrap()],
            )]))
            .unwrap();
            let free = FreeItemsPromotion::new(OfferBook::from_iter([(
                "VOUCHER",
                vec![FreeItemsOfferRule::new(2, 1).unwrap()],
            )]))
            .unwrap();

            TestStore {
                products,
                promotions: vec![bulk.into(), free.into()],
                baskets: RwLock::new(HashMap::new()),
            }
        }
    }

    impl CheckoutStore for TestStore {
        fn get_product(&self, code: &str) -> CoreResult<&Product> {
            self.products
                .get(code)
                .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))
        }

        fn get_promotion(&self, promotion_type: PromotionType) -> CoreResult<&Promotion> {
            self.promotions
                .iter()
                .find(|p| p.promotion_type() == promotion_type)
                .ok_or_else(|| CoreError::PromotionNotFound(promotion_type.to_string()))
        }

        fn get_promotions(&self) -> &[Promotion] {
            &self.promotions
        }

        fn get_basket(&self, id: &str) -> CoreResult<Arc<Basket>> {
            self.baskets
                .read()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| CoreError::BasketNotFound(id.to_string()))
        }

        fn add_basket(&self, basket: Basket) -> CoreResult<Arc<Basket>> {
            let mut baskets = self.baskets.write().unwrap();
            if baskets.contains_key(basket.id()) {
                return Err(CoreError::PrimaryKey(basket.id().to_string()));
            }
            let basket = Arc::new(basket);
            baskets.insert(basket.id().to_string(), basket.clone());
            Ok(basket)
        }

        fn delete_basket(&self, id: &str) {
            self.baskets.write().unwrap().remove(id);
        }

        fn basket_count(&self) -> usize {
            self.baskets.read().unwrap().len()
        }
    }

    #[test]
    fn test_create_basket() {
        let service = CheckoutService::new(TestStore::new());

        let id = service.create_basket().unwrap();

        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(service.store().basket_count(), 1);
        assert_eq!(service.get_basket_price(&id).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_full_checkout() {
        let service = CheckoutService::new(TestStore::new());
        let id = service.create_basket().unwrap();

        for code in ["PEN", "VOUCHER", "PEN", "VOUCHER", "PEN", "VOUCHER", "MUG"] {
            service.add_product_to_basket(&id, code).unwrap();
        }

        // PEN: 3 × 8.20, VOUCHER: 0 + 12.00 + 12.00, MUG: 7.50
        let price = service.get_basket_price(&id).unwrap();
        assert_eq!(price, Decimal::new(2460 + 2400 + 750, 2));

        let breakdown = service.get_basket_breakdown(&id).unwrap();
        assert_eq!(breakdown.lines.len(), 3);
        assert_eq!(breakdown.total.cents(), 2460 + 2400 + 750);
    }

    #[test]
    fn test_add_unknown_product() {
        let service = CheckoutService::new(TestStore::new());
        let id = service.create_basket().unwrap();

        let err = service.add_product_to_basket(&id, "LAPTOP").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(code) if code == "LAPTOP"));
    }

    #[test]
    fn test_unknown_basket() {
        let service = CheckoutService::new(TestStore::new());

        assert!(matches!(
            service.add_product_to_basket("missing", "PEN"),
            Err(CoreError::BasketNotFound(_))
        ));
        assert!(matches!(
            service.get_basket_price("missing"),
            Err(CoreError::BasketNotFound(_))
        ));
    }

    #[test]
    fn test_delete_basket() {
        let service = CheckoutService::new(TestStore::new());
        let id = service.create_basket().unwrap();

        service.delete_basket(&id);
        service.delete_basket(&id);

        assert_eq!(service.store().basket_count(), 0);
        assert!(matches!(
            service.get_basket_price(&id),
            Err(CoreError::BasketNotFound(_))
        ));
    }

    #[test]
    fn test_store_promotion_lookup() {
        let store = TestStore::new();
        assert!(store.get_promotion(PromotionType::FreeItems).is_ok());
    }
}
