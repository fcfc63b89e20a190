//! Account Repository
//!
//! The account is one row; its items live in the `items` JSON column and
//! are always written back together with the rest of the aggregate.

use super::{RepoError, RepoResult};
use shared::models::{Account, AccountState};
use sqlx::SqliteExecutor;
use sqlx::types::Json;

const SELECT_ACCOUNT: &str = "SELECT id, tenant_key, ticket_number, table_number, table_label, server, items, subtotal, state, opened_at, closed_at, payment_method, amount_paid, version FROM account";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: i64,
) -> RepoResult<Option<Account>> {
    let sql = format!("{SELECT_ACCOUNT} WHERE id = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// The open account on a table, if any
pub async fn find_open_on_table<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    table_number: i32,
) -> RepoResult<Option<Account>> {
    let sql = format!("{SELECT_ACCOUNT} WHERE tenant_key = ? AND table_number = ? AND state = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(tenant)
        .bind(table_number)
        .bind(AccountState::Open)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Whether another open or finalized account still holds the table
pub async fn exists_active_on_table<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    table_number: i32,
    excluding_id: i64,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM account WHERE tenant_key = ? AND table_number = ? AND id <> ? AND state IN (?, ?) LIMIT 1",
    )
    .bind(tenant)
    .bind(table_number)
    .bind(excluding_id)
    .bind(AccountState::Open)
    .bind(AccountState::Finalized)
    .fetch_optional(executor)
    .await?;
    Ok(found.is_some())
}

/// Open and finalized accounts of a tenant, newest first
pub async fn list_active<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
) -> RepoResult<Vec<Account>> {
    let sql = format!(
        "{SELECT_ACCOUNT} WHERE tenant_key = ? AND state IN (?, ?) ORDER BY opened_at DESC, id DESC"
    );
    let rows = sqlx::query_as::<_, Account>(&sql)
        .bind(tenant)
        .bind(AccountState::Open)
        .bind(AccountState::Finalized)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

/// Closed accounts whose `closed_at` falls in `[start, end)`
pub async fn list_closed_between<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
    start: i64,
    end: i64,
) -> RepoResult<Vec<Account>> {
    let sql = format!(
        "{SELECT_ACCOUNT} WHERE tenant_key = ? AND state = ? AND closed_at >= ? AND closed_at < ? ORDER BY closed_at DESC"
    );
    let rows = sqlx::query_as::<_, Account>(&sql)
        .bind(tenant)
        .bind(AccountState::Closed)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

/// Subtotals of every closed account of a tenant
pub async fn closed_subtotals<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tenant: &str,
) -> RepoResult<Vec<f64>> {
    let rows: Vec<f64> =
        sqlx::query_scalar("SELECT subtotal FROM account WHERE tenant_key = ? AND state = ?")
            .bind(tenant)
            .bind(AccountState::Closed)
            .fetch_all(executor)
            .await?;
    Ok(rows)
}

/// Insert a new account (version starts at the value carried by `account`)
pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, account: &Account) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO account (id, tenant_key, ticket_number, table_number, table_label, server, items, subtotal, state, opened_at, closed_at, payment_method, amount_paid, version) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    )
    .bind(account.id)
    .bind(&account.tenant_key)
    .bind(account.ticket_number)
    .bind(account.table.table_number)
    .bind(&account.table.label)
    .bind(&account.server)
    .bind(Json(&account.items))
    .bind(account.subtotal)
    .bind(account.state)
    .bind(account.opened_at)
    .bind(account.closed_at)
    .bind(account.payment_method)
    .bind(account.amount_paid)
    .bind(account.version)
    .execute(executor)
    .await?;
    Ok(())
}

/// Persist the whole aggregate if nobody saved it since it was read.
///
/// Returns the new version. Fails with [`RepoError::VersionConflict`] when
/// `account.version` is stale.
pub async fn save<'e, E: SqliteExecutor<'e>>(executor: E, account: &Account) -> RepoResult<i64> {
    let next_version = account.version + 1;
    let result = sqlx::query(
        "UPDATE account SET items = ?1, subtotal = ?2, state = ?3, closed_at = ?4, payment_method = ?5, amount_paid = ?6, version = ?7 \
         WHERE id = ?8 AND version = ?9",
    )
    .bind(Json(&account.items))
    .bind(account.subtotal)
    .bind(account.state)
    .bind(account.closed_at)
    .bind(account.payment_method)
    .bind(account.amount_paid)
    .bind(next_version)
    .bind(account.id)
    .bind(account.version)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::VersionConflict(format!("account {}", account.id)));
    }
    Ok(next_version)
}

/// Hard delete (items go with the row; movements are untouched)
#[cfg(test)]
pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM account WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use shared::models::{AccountItem, PaymentMethod, TableRef};

    fn open_account(id: i64, ticket: i64, table: i32, opened_at: i64) -> Account {
        Account {
            id,
            ticket_number: ticket,
            table: TableRef {
                table_number: table,
                label: Some("Terraza".into()),
            },
            server: "Ana".into(),
            items: vec![],
            subtotal: 0.0,
            state: AccountState::Open,
            tenant_key: "r1".into(),
            opened_at,
            closed_at: None,
            payment_method: None,
            amount_paid: 0.0,
            version: 0,
        }
    }

    fn item(id: &str) -> AccountItem {
        AccountItem {
            id: id.into(),
            product_id: 7,
            product_name: "Taco".into(),
            image: None,
            unit_base_price: 50.0,
            quantity: 2,
            extras: vec![],
            comments: String::new(),
            line_total: 100.0,
            committed: false,
            committed_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_roundtrips_aggregate() {
        let pool = test_pool().await;
        let mut account = open_account(1, 1, 5, 1000);
        account.items.push(item("a"));
        insert(&pool, &account).await.unwrap();

        let found = find_by_id(&pool, 1).await.unwrap().unwrap();
        assert_eq!(found, account);
        assert_eq!(found.table.label.as_deref(), Some("Terraza"));
        assert!(find_by_id(&pool, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_bumps_version_and_rejects_stale_copy() {
        let pool = test_pool().await;
        let account = open_account(1, 1, 5, 1000);
        insert(&pool, &account).await.unwrap();

        let mut first = find_by_id(&pool, 1).await.unwrap().unwrap();
        let mut second = first.clone();

        first.items.push(item("a"));
        assert_eq!(save(&pool, &first).await.unwrap(), 1);

        second.items.push(item("b"));
        let err = save(&pool, &second).await.unwrap_err();
        assert!(matches!(err, RepoError::VersionConflict(_)));

        let stored = find_by_id(&pool, 1).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].id, "a");
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_exists_active_on_table_ignores_self_and_closed() {
        let pool = test_pool().await;
        insert(&pool, &open_account(1, 1, 5, 1000)).await.unwrap();
        assert!(!exists_active_on_table(&pool, "r1", 5, 1).await.unwrap());
        assert!(exists_active_on_table(&pool, "r1", 5, 99).await.unwrap());
        assert!(!exists_active_on_table(&pool, "r2", 5, 99).await.unwrap());

        let mut closed = open_account(2, 2, 6, 2000);
        closed.state = AccountState::Closed;
        closed.closed_at = Some(3000);
        closed.payment_method = Some(PaymentMethod::Cash);
        insert(&pool, &closed).await.unwrap();
        assert!(!exists_active_on_table(&pool, "r1", 6, 99).await.unwrap());
    }

    #[tokio::test]
    async fn test_one_open_account_per_table_is_enforced_by_schema() {
        let pool = test_pool().await;
        insert(&pool, &open_account(1, 1, 5, 1000)).await.unwrap();
        let err = insert(&pool, &open_account(2, 2, 5, 2000)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // A finalized account does not hold the slot
        let mut first = find_by_id(&pool, 1).await.unwrap().unwrap();
        first.state = AccountState::Finalized;
        save(&pool, &first).await.unwrap();
        insert(&pool, &open_account(2, 2, 5, 2000)).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_active_excludes_closed_and_orders_newest_first() {
        let pool = test_pool().await;
        insert(&pool, &open_account(1, 1, 1, 1000)).await.unwrap();
        insert(&pool, &open_account(2, 2, 2, 3000)).await.unwrap();
        let mut closed = open_account(3, 3, 3, 2000);
        closed.state = AccountState::Closed;
        closed.closed_at = Some(2500);
        closed.payment_method = Some(PaymentMethod::Card);
        insert(&pool, &closed).await.unwrap();
        let mut cancelled = open_account(4, 4, 4, 4000);
        cancelled.state = AccountState::Cancelled;
        insert(&pool, &cancelled).await.unwrap();

        let ids: Vec<i64> = list_active(&pool, "r1")
            .await
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        let closed_rows = list_closed_between(&pool, "r1", 2000, 3000).await.unwrap();
        assert_eq!(closed_rows.len(), 1);
        assert_eq!(closed_rows[0].payment_method, Some(PaymentMethod::Card));
        assert!(list_closed_between(&pool, "r1", 2501, 3000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        insert(&pool, &open_account(1, 1, 5, 1000)).await.unwrap();
        assert!(delete(&pool, 1).await.unwrap());
        assert!(!delete(&pool, 1).await.unwrap());
    }
}
