//! Ledger Service
//!
//! Manual cash movements plus the daily and lifetime cash reports.

use chrono_tz::Tz;
use shared::models::{CashSummary, DailyReport, Movement, MovementCreate, MovementKind, PaymentMethod};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::error::{LedgerError, LedgerResult};
use super::summary;
use crate::db::repository::{account, movement};
use crate::money::MAX_AMOUNT;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};

#[derive(Clone)]
pub struct LedgerService {
    pool: SqlitePool,
    /// Business timezone used to cut calendar days
    tz: Tz,
}

impl LedgerService {
    pub fn new(pool: SqlitePool, tz: Tz) -> Self {
        Self { pool, tz }
    }

    pub async fn record_movement(&self, data: MovementCreate) -> LedgerResult<Movement> {
        validate_required_text(&data.tenant, "tenant", MAX_NAME_LEN)?;
        validate_required_text(&data.description, "description", MAX_NOTE_LEN)?;

        let kind: MovementKind = data
            .kind
            .parse()
            .map_err(|_| LedgerError::InvalidKind(data.kind.clone()))?;

        let amount = data
            .amount
            .ok_or_else(|| LedgerError::Validation("amount is required".into()))?;
        if !amount.is_finite() || amount.abs() > MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must be a finite number up to {MAX_AMOUNT}, got {amount}"
            )));
        }

        let payment_method = match data.payment_method.as_deref().map(str::trim) {
            None | Some("") => PaymentMethod::Cash,
            Some(raw) => raw
                .parse()
                .map_err(|_| LedgerError::InvalidPaymentMethod(raw.to_string()))?,
        };

        let now = now_millis();
        let record = Movement {
            id: snowflake_id(),
            tenant_key: data.tenant.trim().to_string(),
            kind,
            description: data.description.trim().to_string(),
            amount: amount.abs(),
            payment_method,
            occurred_at: data.occurred_at.unwrap_or(now),
            account_id: data.account_id,
            created_at: now,
        };
        movement::insert(&self.pool, &record).await?;

        tracing::info!(
            movement_id = record.id,
            tenant = %record.tenant_key,
            kind = %record.kind,
            amount = record.amount,
            "Cash movement recorded"
        );
        Ok(record)
    }

    pub async fn delete_movement(&self, id: i64) -> LedgerResult<()> {
        if !movement::delete(&self.pool, id).await? {
            return Err(LedgerError::MovementNotFound(id));
        }
        tracing::info!(movement_id = id, "Cash movement deleted");
        Ok(())
    }

    /// Closed accounts and movements of one calendar day (business timezone)
    pub async fn daily_report(&self, tenant: &str, date: &str) -> LedgerResult<DailyReport> {
        let day = parse_date(date)?;
        let start = day_start_millis(day, self.tz);
        let end = day_end_millis(day, self.tz);

        let closed = account::list_closed_between(&self.pool, tenant, start, end).await?;
        let movements = movement::list_between(&self.pool, tenant, start, end).await?;
        let (entries, totals) = summary::merge_daily(&closed, &movements);

        tracing::debug!(
            tenant = %tenant,
            date = %day,
            sales = closed.len(),
            movements = movements.len(),
            "Daily report built"
        );
        Ok(DailyReport {
            tenant_key: tenant.to_string(),
            date: day.format("%Y-%m-%d").to_string(),
            entries,
            totals,
        })
    }

    /// Lifetime figures, not bounded by date
    pub async fn cash_summary(&self, tenant: &str) -> LedgerResult<CashSummary> {
        let subtotals = account::closed_subtotals(&self.pool, tenant).await?;
        let movements = movement::list_by_tenant(&self.pool, tenant).await?;
        Ok(summary::summarize(&subtotals, &movements))
    }
}
