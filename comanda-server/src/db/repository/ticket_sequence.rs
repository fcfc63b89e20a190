//! Ticket Number Sequence
//!
//! One counter row per tenant, advanced atomically by an upsert so
//! concurrent opens never read the same value. Values are never reused,
//! even after the account holding a number is deleted.

use super::RepoResult;
use sqlx::SqliteExecutor;

/// Allocate the next ticket number for `tenant` (first call returns 1)
pub async fn next_value<'e, E: SqliteExecutor<'e>>(executor: E, tenant: &str) -> RepoResult<i64> {
    let value: i64 = sqlx::query_scalar(
        "INSERT INTO ticket_sequence (tenant_key, last_value) VALUES (?1, 1) \
         ON CONFLICT(tenant_key) DO UPDATE SET last_value = last_value + 1 \
         RETURNING last_value",
    )
    .bind(tenant)
    .fetch_one(executor)
    .await?;
    Ok(value)
}

/// Last allocated value, 0 if the tenant never opened an account
#[cfg(test)]
pub async fn current_value<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
) -> RepoResult<i64> {
    let value: Option<i64> =
        sqlx::query_scalar("SELECT last_value FROM ticket_sequence WHERE tenant_key = ?")
            .bind(tenant)
            .fetch_optional(executor)
            .await?;
    Ok(value.unwrap_or(0))
}
