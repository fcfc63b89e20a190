//! Line pricing
//!
//! Prices are snapshotted from the catalog when an item is added; the line
//! total is authoritative from then on.

use rust_decimal::Decimal;
use shared::models::{AccountItem, AccountItemInput, ItemExtra, Product};

use super::error::{AccountError, AccountResult};
use crate::money::{self, MAX_PRICE, MAX_QUANTITY, to_decimal, to_f64};
use crate::utils::validation::MAX_NOTE_LEN;

/// (unit + Σ extras) × quantity
pub fn line_total(unit_base_price: f64, extras: &[ItemExtra], quantity: i32) -> Decimal {
    let unit = to_decimal(unit_base_price) + money::sum(extras.iter().map(|e| e.extra_cost));
    unit * Decimal::from(quantity)
}

/// Sum of line totals over committed items
pub fn committed_subtotal(items: &[AccountItem]) -> f64 {
    to_f64(money::sum(
        items.iter().filter(|i| i.committed).map(|i| i.line_total),
    ))
}

fn require_price(value: f64, what: &str) -> AccountResult<()> {
    if !value.is_finite() || value < 0.0 || value > MAX_PRICE {
        return Err(AccountError::InvalidAmount(format!(
            "{what} must be between 0 and {MAX_PRICE}, got {value}"
        )));
    }
    Ok(())
}

/// Validate the shape of an item request before any catalog lookup
pub fn validate_input(input: &AccountItemInput) -> AccountResult<()> {
    if !(1..=MAX_QUANTITY).contains(&input.quantity) {
        return Err(AccountError::Validation(format!(
            "quantity must be between 1 and {MAX_QUANTITY}, got {}",
            input.quantity
        )));
    }
    if let Some(comments) = &input.comments
        && comments.chars().count() > MAX_NOTE_LEN
    {
        return Err(AccountError::Validation(format!(
            "comments is too long ({} chars, max {MAX_NOTE_LEN})",
            comments.chars().count()
        )));
    }
    Ok(())
}

/// Build an uncommitted line item from a catalog product
pub fn price_item(product: &Product, input: &AccountItemInput) -> AccountResult<AccountItem> {
    validate_input(input)?;
    require_price(product.sale_price, "sale price")?;

    let mut extras = Vec::with_capacity(input.extra_ids.len());
    for extra_id in &input.extra_ids {
        let extra = product.active_extra(extra_id).ok_or_else(|| {
            AccountError::ExtraNotAvailable {
                product_id: product.id,
                extra_id: extra_id.clone(),
            }
        })?;
        require_price(extra.cost, "extra cost")?;
        extras.push(ItemExtra {
            extra_name: extra.name.clone(),
            extra_cost: extra.cost,
        });
    }

    let total = line_total(product.sale_price, &extras, input.quantity);

    Ok(AccountItem {
        id: uuid::Uuid::new_v4().to_string(),
        product_id: product.id,
        product_name: product.name.clone(),
        image: product.image.clone(),
        unit_base_price: product.sale_price,
        quantity: input.quantity,
        extras,
        comments: input.comments.clone().unwrap_or_default(),
        line_total: to_f64(total),
        committed: false,
        committed_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductExtra;

    fn product() -> Product {
        Product {
            id: 7,
            tenant_key: "r1".into(),
            name: "Taco".into(),
            image: Some("taco.png".into()),
            description: None,
            category: None,
            stock: 10,
            cost: 20.0,
            sale_price: 50.0,
            extras: vec![
                ProductExtra {
                    id: "queso".into(),
                    name: "Queso".into(),
                    cost: 10.0,
                    active: true,
                },
                ProductExtra {
                    id: "salsa".into(),
                    name: "Salsa".into(),
                    cost: 0.15,
                    active: true,
                },
                ProductExtra {
                    id: "pina".into(),
                    name: "Piña".into(),
                    cost: 5.0,
                    active: false,
                },
            ],
            created_at: 0,
        }
    }

    fn input(quantity: i32, extras: &[&str]) -> AccountItemInput {
        AccountItemInput {
            product_id: 7,
            quantity,
            extra_ids: extras.iter().map(|s| s.to_string()).collect(),
            comments: None,
        }
    }

    #[test]
    fn test_price_item_snapshots_catalog() {
        let item = price_item(&product(), &input(2, &["queso"])).unwrap();
        assert_eq!(item.line_total, 120.0);
        assert_eq!(item.unit_base_price, 50.0);
        assert_eq!(item.product_name, "Taco");
        assert_eq!(item.image.as_deref(), Some("taco.png"));
        assert_eq!(
            item.extras,
            vec![ItemExtra {
                extra_name: "Queso".into(),
                extra_cost: 10.0
            }]
        );
        assert!(!item.committed);
        assert!(uuid::Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_line_total_is_exact_decimal() {
        let item = price_item(&product(), &input(3, &["salsa"])).unwrap();
        // (50 + 0.15) × 3
        assert_eq!(item.line_total, 150.45);
    }

    #[test]
    fn test_disabled_or_unknown_extra_is_rejected() {
        assert!(matches!(
            price_item(&product(), &input(1, &["pina"])),
            Err(AccountError::ExtraNotAvailable { .. })
        ));
        assert!(matches!(
            price_item(&product(), &input(1, &["nope"])),
            Err(AccountError::ExtraNotAvailable { .. })
        ));
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_input(&input(0, &[])).is_err());
        assert!(validate_input(&input(-1, &[])).is_err());
        assert!(validate_input(&input(MAX_QUANTITY + 1, &[])).is_err());
        assert!(validate_input(&input(MAX_QUANTITY, &[])).is_ok());
    }

    #[test]
    fn test_comments_limit_counts_characters() {
        let mut ok = input(1, &[]);
        ok.comments = Some("sin piña, poco picante ñ".repeat(20));
        assert!(ok.comments.as_ref().unwrap().len() > MAX_NOTE_LEN);
        assert!(validate_input(&ok).is_ok());

        let mut long = input(1, &[]);
        long.comments = Some("ñ".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_input(&long).is_err());
    }

    #[test]
    fn test_committed_subtotal_ignores_pending_items() {
        let mut a = price_item(&product(), &input(2, &["queso"])).unwrap();
        let b = price_item(&product(), &input(1, &[])).unwrap();
        assert_eq!(committed_subtotal(&[a.clone(), b.clone()]), 0.0);
        a.committed = true;
        assert_eq!(committed_subtotal(&[a, b]), 120.0);
    }
}
