//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// `is_active` is true while an account is open on the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub tenant_key: String,
    pub table_number: i32,
    pub label: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    #[serde(alias = "tenantKey")]
    pub tenant: String,
    pub table_number: i32,
    #[serde(default)]
    pub label: Option<String>,
}
