//! Dining Table Repository (table registry collaborator)

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate};
use sqlx::SqliteExecutor;

pub async fn find_by_number<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    table_number: i32,
) -> RepoResult<Option<DiningTable>> {
    let row = sqlx::query_as::<_, DiningTable>(
        "SELECT id, tenant_key, table_number, label, is_active, created_at FROM dining_table WHERE tenant_key = ? AND table_number = ?",
    )
    .bind(tenant)
    .bind(table_number)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

/// Flag a table as occupied / free. Returns `false` if the table is not registered.
pub async fn set_active<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    table_number: i32,
    active: bool,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE dining_table SET is_active = ? WHERE tenant_key = ? AND table_number = ?",
    )
    .bind(active)
    .bind(tenant)
    .bind(table_number)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn create<'e, E: SqliteExecutor<'e>>(
    executor: E,
    data: DiningTableCreate,
) -> RepoResult<DiningTable> {
    if data.table_number < 1 {
        return Err(RepoError::Validation(format!(
            "table number must be >= 1, got {}",
            data.table_number
        )));
    }
    let table = DiningTable {
        id: shared::util::snowflake_id(),
        tenant_key: data.tenant,
        table_number: data.table_number,
        label: data.label,
        is_active: false,
        created_at: shared::util::now_millis(),
    };
    sqlx::query(
        "INSERT INTO dining_table (id, tenant_key, table_number, label, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(table.id)
    .bind(&table.tenant_key)
    .bind(table.table_number)
    .bind(&table.label)
    .bind(table.is_active)
    .bind(table.created_at)
    .execute(executor)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Table {} already exists",
            table.table_number
        )),
        other => other,
    })?;
    Ok(table)
}
