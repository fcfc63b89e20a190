//! Movement Repository (现金流水)

use super::RepoResult;
use shared::models::Movement;
use sqlx::SqliteExecutor;

const SELECT_MOVEMENT: &str = "SELECT id, tenant_key, kind, description, amount, payment_method, occurred_at, account_id, created_at FROM movement";

pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, movement: &Movement) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO movement (id, tenant_key, kind, description, amount, payment_method, occurred_at, account_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(movement.id)
    .bind(&movement.tenant_key)
    .bind(movement.kind)
    .bind(&movement.description)
    .bind(movement.amount)
    .bind(movement.payment_method)
    .bind(movement.occurred_at)
    .bind(movement.account_id)
    .bind(movement.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: i64,
) -> RepoResult<Option<Movement>> {
    let sql = format!("{SELECT_MOVEMENT} WHERE id = ?");
    let row = sqlx::query_as::<_, Movement>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Movements whose `occurred_at` falls in `[start, end)`, newest first
pub async fn list_between<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    start: i64,
    end: i64,
) -> RepoResult<Vec<Movement>> {
    let sql = format!(
        "{SELECT_MOVEMENT} WHERE tenant_key = ? AND occurred_at >= ? AND occurred_at < ? ORDER BY occurred_at DESC"
    );
    let rows = sqlx::query_as::<_, Movement>(&sql)
        .bind(tenant)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

/// Every movement of a tenant, newest first
pub async fn list_by_tenant<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
) -> RepoResult<Vec<Movement>> {
    let sql = format!("{SELECT_MOVEMENT} WHERE tenant_key = ? ORDER BY occurred_at DESC");
    let rows = sqlx::query_as::<_, Movement>(&sql)
        .bind(tenant)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM movement WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
