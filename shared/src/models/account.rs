//! Account (tab) Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account lifecycle state
///
/// `open → finalized → closed`, with `finalized → open` on reopen.
/// `cancelled` is representable but no operation transitions into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AccountState {
    #[serde(alias = "abierta")]
    Open,
    #[serde(alias = "finalizada")]
    Finalized,
    #[serde(alias = "cerrada")]
    Closed,
    #[serde(alias = "cancelada")]
    Cancelled,
}

impl AccountState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Finalized => "finalized",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method (支付方式)
///
/// Accounts settle with cash, card or transfer; manual cash movements may
/// additionally use `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentMethod {
    #[serde(alias = "efectivo")]
    Cash,
    #[serde(alias = "tarjeta")]
    Card,
    #[serde(alias = "transferencia")]
    Transfer,
    #[serde(alias = "otro")]
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
            Self::Other => "other",
        }
    }

    /// Whether this method may settle an account
    pub fn settles_accounts(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a payment method string is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentMethod(pub String);

impl fmt::Display for UnknownPaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment method: '{}'", self.0)
    }
}

impl std::error::Error for UnknownPaymentMethod {}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(Self::Cash),
            "card" | "tarjeta" => Ok(Self::Card),
            "transfer" | "transferencia" => Ok(Self::Transfer),
            "other" | "otro" => Ok(Self::Other),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Serializes an unset payment method as `""`, the wire value clients expect
/// before an account is closed.
mod payment_method_or_empty {
    use super::PaymentMethod;
    use serde::de::IntoDeserializer;
    use serde::de::value::StrDeserializer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<PaymentMethod>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(method) => method.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PaymentMethod>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => {
                let de: StrDeserializer<'_, D::Error> = s.into_deserializer();
                PaymentMethod::deserialize(de).map(Some)
            }
        }
    }
}

/// Table snapshot taken when the account is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableRef {
    pub table_number: i32,
    /// Custom table name, e.g. "Terraza 2"
    #[cfg_attr(feature = "db", sqlx(rename = "table_label"))]
    #[serde(default)]
    pub label: Option<String>,
}

impl TableRef {
    /// Label shown on tickets and reports
    pub fn display_label(&self) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("Table {}", self.table_number),
        }
    }
}

/// Extra attached to a line item (snapshot, not a reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemExtra {
    pub extra_name: String,
    pub extra_cost: f64,
}

/// Line item embedded in an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountItem {
    /// UUID v4, stable within the account
    pub id: String,
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Catalog sale price at add time
    pub unit_base_price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub extras: Vec<ItemExtra>,
    #[serde(default)]
    pub comments: String,
    /// (unit_base_price + Σ extra_cost) × quantity
    pub line_total: f64,
    #[serde(default)]
    pub committed: bool,
    #[serde(default)]
    pub committed_at: Option<i64>,
}

/// Account entity (账单 / tab)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub ticket_number: i64,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub table: TableRef,
    pub server: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<AccountItem>,
    /// Sum of `line_total` over committed items
    pub subtotal: f64,
    pub state: AccountState,
    pub tenant_key: String,
    pub opened_at: i64,
    #[serde(default)]
    pub closed_at: Option<i64>,
    #[serde(default, with = "payment_method_or_empty")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub amount_paid: f64,
    /// Optimistic concurrency token, bumped on every save
    #[serde(default)]
    pub version: i64,
}

/// Open account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOpen {
    pub table_number: i32,
    #[serde(default)]
    pub label: Option<String>,
    pub server: String,
    #[serde(alias = "tenantKey")]
    pub tenant: String,
}

fn default_quantity() -> i32 {
    1
}

/// One item to append to an account
///
/// Prices are never taken from the client; they come from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountItemInput {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub extra_ids: Vec<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Add items payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<AccountItemInput>,
}

/// Send-to-kitchen payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequest {
    pub item_ids: Vec<String>,
}

/// Close account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRequest {
    pub payment_method: String,
    #[serde(rename = "totalPagado", alias = "amountPaid")]
    pub amount_paid: f64,
}

/// Per-item outcome of a kitchen commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommitStatus {
    Committed,
    AlreadyCommitted,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCommitResult {
    pub item_id: String,
    pub status: CommitStatus,
    /// Whether the product's stock was decremented
    pub stock_updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Send-to-kitchen response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResponse {
    pub account: Account,
    pub results: Vec<ItemCommitResult>,
}
