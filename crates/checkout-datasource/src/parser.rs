//! # Promotion Parser
//!
//! Turns one JSON promotion definition into a [`Promotion`].
//!
//! ## Input Shape
//! ```json
//! {"code": "BULK", "promos": [
//!     {"product": "PEN", "rules": [{"buy": 3, "price": 820}]}
//! ]}
//! {"code": "FREE_ITEMS", "promos": [
//!     {"product": "VOUCHER", "rules": [{"buy": 2, "free": 1}]}
//! ]}
//! ```
//!
//! ## Leniency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  missing / unknown "code"          → Err(PromotionNotFound)            │
//! │  promo without "product"           → promo skipped                     │
//! │  rule failing validation           → rule skipped                      │
//! │  promo whose rules were all skipped → promo skipped                    │
//! │  nothing left                      → Err(PromotionInvalid)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numbers may be written as integers or as integral floats (`3` or `3.0`).

use checkout_core::{
    BulkOfferRule, BulkPromotion, CoreError, CoreResult, FreeItemsOfferRule, FreeItemsPromotion,
    OfferBook, Promotion, PromotionType, ValidationError,
};
use serde_json::Value;
use tracing::warn;

/// Parses one promotion definition.
pub fn parse_promotion(node: &Value) -> CoreResult<Promotion> {
    let code = node.get("code").and_then(Value::as_str).unwrap_or_default();
    let promotion_type: PromotionType = code.parse()?;

    let promos = node
        .get("promos")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    match promotion_type {
        PromotionType::Bulk => {
            let offers = parse_offers(promotion_type, promos, parse_bulk_rule);
            Ok(BulkPromotion::new(offers)?.into())
        }
        PromotionType::FreeItems => {
            let offers = parse_offers(promotion_type, promos, parse_free_items_rule);
            Ok(FreeItemsPromotion::new(offers)?.into())
        }
    }
}

fn parse_offers<R>(
    promotion_type: PromotionType,
    promos: &[Value],
    parse_rule: fn(&Value) -> CoreResult<R>,
) -> OfferBook<R> {
    let mut offers = OfferBook::new();

    for promo in promos {
        let product = promo
            .get("product")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if product.is_empty() {
            warn!(promotion = %promotion_type, entry = %promo, "Skipping promo without product code");
            continue;
        }

        let raw_rules = promo
            .get("rules")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut rules = Vec::with_capacity(raw_rules.len());
        for raw in raw_rules {
            match parse_rule(raw) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    warn!(promotion = %promotion_type, product, rule = %raw, error = %e, "Skipping invalid offer rule")
                }
            }
        }

        if rules.is_empty() {
            warn!(promotion = %promotion_type, product, "Skipping product without valid rules");
            continue;
        }

        if offers.insert(product, rules).is_some() {
            warn!(promotion = %promotion_type, product, "Product listed twice, keeping the later rules");
        }
    }

    offers
}

fn parse_bulk_rule(raw: &Value) -> CoreResult<BulkOfferRule> {
    BulkOfferRule::new(integer_field(raw, "buy")?, integer_field(raw, "price")?)
}

fn parse_free_items_rule(raw: &Value) -> CoreResult<FreeItemsOfferRule> {
    FreeItemsOfferRule::new(integer_field(raw, "buy")?, integer_field(raw, "free")?)
}

/// Reads an integer, accepting integral floats.
fn integer_field(raw: &Value, field: &str) -> CoreResult<i64> {
    let value = raw.get(field).ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })?;

    let number = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    });

    number.ok_or_else(|| {
        CoreError::from(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected an integer, got {}", value),
        })
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bulk(offers: Vec<(&str, Vec<(i64, i64)>)>) -> Promotion {
        let book = offers
            .into_iter()
            .map(|(code, rules)| {
                let rules: Vec<_> = rules
                    .into_iter()
                    .map(|(buy, price)| BulkOfferRule::new(buy, price).unwrap())
                    .collect();
                (code, rules)
            })
            .collect();
        BulkPromotion::new(book).unwrap().into()
    }

    fn free_items(offers: Vec<(&str, Vec<(i64, i64)>)>) -> Promotion {
        let book = offers
            .into_iter()
            .map(|(code, rules)| {
                let rules: Vec<_> = rules
                    .into_iter()
                    .map(|(buy, free)| FreeItemsOfferRule::new(buy, free).unwrap())
                    .collect();
                (code, rules)
            })
            .collect();
        FreeItemsPromotion::new(book).unwrap().into()
    }

    fn assert_empty_items(result: CoreResult<Promotion>, expected_code: &str) {
        match result {
            Err(CoreError::PromotionInvalid { code, reason }) => {
                assert_eq!(code, expected_code);
                assert_eq!(reason, "empty items list");
            }
            other => panic!("expected PromotionInvalid, got {:?}", other),
        }
    }

    // -------------------------------------------------------------------------
    // Promotion code
    // -------------------------------------------------------------------------

    #[test]
    fn test_missing_code() {
        let result = parse_promotion(&json!({}));
        assert!(matches!(result, Err(CoreError::PromotionNotFound(code)) if code.is_empty()));
    }

    #[test]
    fn test_unknown_code() {
        let result = parse_promotion(&json!({"code": "ONE_FREE", "promos": []}));
        assert!(matches!(result, Err(CoreError::PromotionNotFound(code)) if code == "ONE_FREE"));
    }

    // -------------------------------------------------------------------------
    // BULK
    // -------------------------------------------------------------------------

    #[test]
    fn test_bulk_without_promos() {
        assert_empty_items(parse_promotion(&json!({"code": "BULK", "promos": []})), "BULK");
        assert_empty_items(parse_promotion(&json!({"code": "BULK"})), "BULK");
    }

    #[test]
    fn test_bulk_skips_empty_product_code() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "", "rules": [{"buy": 3, "price": 1000}, {"buy": 5, "price": 850}]},
            {"product": "PR2", "rules": [{"buy": 3, "price": 500}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![("PR2", vec![(3, 500)])])
        );
    }

    #[test]
    fn test_bulk_skips_non_positive_buy() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "price": 1000}, {"buy": -5, "price": 850}]},
            {"product": "PR2", "rules": [{"buy": 3, "price": 500}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![("PR1", vec![(3, 1000)]), ("PR2", vec![(3, 500)])])
        );
    }

    #[test]
    fn test_bulk_skips_negative_price() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "price": -1000}, {"buy": 5, "price": 850}]},
            {"product": "PR2", "rules": [{"buy": 3, "price": 500}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![("PR1", vec![(5, 850)]), ("PR2", vec![(3, 500)])])
        );
    }

    #[test]
    fn test_bulk_skips_product_without_rules() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": []},
            {"product": "PR2", "rules": [{"buy": 2, "price": 600}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![("PR2", vec![(2, 600)])])
        );
    }

    #[test]
    fn test_bulk_keeps_rule_order() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "price": 1000}, {"buy": 5, "price": 850}]},
            {"product": "PR2", "rules": [{"buy": 3, "price": 500}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![
                ("PR1", vec![(3, 1000), (5, 850)]),
                ("PR2", vec![(3, 500)]),
            ])
        );
    }

    #[test]
    fn test_bulk_all_rules_invalid() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": [{"buy": 0, "price": 100}, {"buy": 2}]}
        ]});

        assert_empty_items(parse_promotion(&node), "BULK");
    }

    // -------------------------------------------------------------------------
    // FREE_ITEMS
    // -------------------------------------------------------------------------

    #[test]
    fn test_free_items_without_promos() {
        assert_empty_items(
            parse_promotion(&json!({"code": "FREE_ITEMS", "promos": []})),
            "FREE_ITEMS",
        );
    }

    #[test]
    fn test_free_items_skips_empty_product_code() {
        let node = json!({"code": "FREE_ITEMS", "promos": [
            {"product": "", "rules": [{"buy": 3, "free": 1}, {"buy": 5, "free": 3}]},
            {"product": "PR2", "rules": [{"buy": 3, "free": 1}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            free_items(vec![("PR2", vec![(3, 1)])])
        );
    }

    #[test]
    fn test_free_items_skips_bad_buy_and_missing_free() {
        let node = json!({"code": "FREE_ITEMS", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "free": 1}, {"buy": -5, "price": 2}]},
            {"product": "PR2", "rules": [{"buy": 3, "free": 1}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            free_items(vec![("PR1", vec![(3, 1)]), ("PR2", vec![(3, 1)])])
        );
    }

    #[test]
    fn test_free_items_skips_negative_free() {
        let node = json!({"code": "FREE_ITEMS", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "free": -1}, {"buy": 5, "free": 2}]},
            {"product": "PR2", "rules": [{"buy": 3, "free": 1}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            free_items(vec![("PR1", vec![(5, 2)]), ("PR2", vec![(3, 1)])])
        );
    }

    #[test]
    fn test_free_items_skips_free_above_buy() {
        let node = json!({"code": "FREE_ITEMS", "promos": [
            {"product": "PR1", "rules": [{"buy": 2, "free": 3}, {"buy": 2, "free": 2}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            free_items(vec![("PR1", vec![(2, 2)])])
        );
    }

    #[test]
    fn test_free_items_skips_product_without_rules() {
        let node = json!({"code": "FREE_ITEMS", "promos": [
            {"product": "PR1", "rules": []},
            {"product": "PR2", "rules": [{"buy": 2, "free": 1}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            free_items(vec![("PR2", vec![(2, 1)])])
        );
    }

    #[test]
    fn test_free_items_correct() {
        let node = json!({"code": "FREE_ITEMS", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "free": 1}, {"buy": 5, "free": 3}]},
            {"product": "PR2", "rules": [{"buy": 3, "free": 1}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            free_items(vec![
                ("PR1", vec![(3, 1), (5, 3)]),
                ("PR2", vec![(3, 1)]),
            ])
        );
    }

    // -------------------------------------------------------------------------
    // Numbers
    // -------------------------------------------------------------------------

    #[test]
    fn test_integral_floats_accepted() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": [{"buy": 3.0, "price": 820.0}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![("PR1", vec![(3, 820)])])
        );
    }

    #[test]
    fn test_fractional_and_string_numbers_rejected() {
        let rule = json!({"buy": 2.5, "price": 100});
        assert!(matches!(
            parse_bulk_rule(&rule),
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));

        let rule = json!({"buy": "3", "price": 100});
        assert!(parse_bulk_rule(&rule).is_err());
    }

    #[test]
    fn test_duplicate_product_keeps_later_rules() {
        let node = json!({"code": "BULK", "promos": [
            {"product": "PR1", "rules": [{"buy": 3, "price": 900}]},
            {"product": "PR1", "rules": [{"buy": 2, "price": 950}]}
        ]});

        assert_eq!(
            parse_promotion(&node).unwrap(),
            bulk(vec![("PR1", vec![(2, 950)])])
        );
    }
}
