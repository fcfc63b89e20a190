//! Cash report models

use super::account::PaymentMethod;
use super::movement::MovementKind;
use serde::{Deserialize, Serialize};

/// One line of the daily cash report
///
/// Either a manual movement or a closed account projected as a sale
/// (`is_sale = true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Movement id, or account id for sales
    pub id: i64,
    pub kind: MovementKind,
    pub description: String,
    pub amount: f64,
    pub payment_method: Option<PaymentMethod>,
    pub occurred_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<i64>,
    pub is_sale: bool,
}

/// Totals for a single day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub sales: f64,
    pub income: f64,
    pub expenses: f64,
    /// sales + income − expenses
    pub balance: f64,
}

/// Daily report (日报)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub tenant_key: String,
    /// YYYY-MM-DD in the business timezone
    pub date: String,
    /// Sorted by `occurred_at` descending
    pub entries: Vec<LedgerEntry>,
    pub totals: DailyTotals,
}

/// Lifetime cash summary
///
/// Field names on the wire follow the existing client contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashSummary {
    /// Manual income (movements without an account reference)
    #[serde(rename = "ingresos")]
    pub manual_income: f64,
    #[serde(rename = "egresos")]
    pub expenses: f64,
    /// Sum of closed account subtotals
    #[serde(rename = "ventasDelDia")]
    pub sales: f64,
    /// sales + manual_income − expenses
    pub balance: f64,
    /// Manual incomes + closed accounts
    #[serde(rename = "countIngresos")]
    pub income_count: i64,
    #[serde(rename = "countEgresos")]
    pub expense_count: i64,
}
