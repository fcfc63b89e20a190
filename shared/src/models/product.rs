//! Product Model (菜品)

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Toggleable priced modifier defined on a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductExtra {
    pub id: String,
    pub name: String,
    pub cost: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub tenant_key: String,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Available stock; may go negative when the kitchen oversells
    pub stock: i64,
    /// Unit cost
    pub cost: f64,
    pub sale_price: f64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub extras: Vec<ProductExtra>,
    pub created_at: i64,
}

impl Product {
    /// Profit margin over sale price, in percent (2dp). Zero when the sale price is zero.
    pub fn margin_percent(&self) -> f64 {
        let price = Decimal::from_f64(self.sale_price).unwrap_or_default();
        if price.is_zero() {
            return 0.0;
        }
        let cost = Decimal::from_f64(self.cost).unwrap_or_default();
        ((price - cost) / price * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    }

    /// Find an extra that can currently be ordered
    pub fn active_extra(&self, extra_id: &str) -> Option<&ProductExtra> {
        self.extras.iter().find(|e| e.id == extra_id && e.active)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[serde(alias = "tenantKey")]
    pub tenant: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub cost: f64,
    pub sale_price: f64,
    #[serde(default)]
    pub extras: Vec<ProductExtra>,
}
