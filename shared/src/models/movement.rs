//! Cash Movement Model (现金流水)

use super::account::PaymentMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a manual cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MovementKind {
    #[serde(alias = "ingreso")]
    Income,
    #[serde(alias = "egreso")]
    Expense,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "ingreso" => Ok(Self::Income),
            "expense" | "egreso" => Ok(Self::Expense),
            other => Err(format!("unknown movement kind: '{other}'")),
        }
    }
}

/// Manual cash-drawer entry
///
/// `amount` is stored non-negative; the sign comes from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Movement {
    pub id: i64,
    pub tenant_key: String,
    pub kind: MovementKind,
    pub description: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub occurred_at: i64,
    /// Back-reference for system-generated entries
    pub account_id: Option<i64>,
    pub created_at: i64,
}

/// Record movement payload
///
/// `kind` and `paymentMethod` stay strings so unknown values surface as
/// domain errors instead of JSON rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementCreate {
    #[serde(alias = "tenantKey")]
    pub tenant: String,
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub account_id: Option<i64>,
    /// Defaults to now
    #[serde(default)]
    pub occurred_at: Option<i64>,
}
