//! Account Engine
//!
//! Every operation follows the same unit of work: load the aggregate, mutate
//! it through [`lifecycle`], persist it whole with an optimistic version
//! check. Operations that touch other tables (ticket sequence, catalog stock,
//! table registry) run those writes in the same SQLite transaction.

use std::collections::HashMap;

use shared::models::{
    Account, AccountItemInput, AccountOpen, AccountState, CloseRequest, CommitResponse,
    CommitStatus, ItemCommitResult, PaymentMethod, Product, TableRef,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::error::{AccountError, AccountResult};
use super::{lifecycle, pricing};
use crate::db::repository::{RepoError, account, dining_table, product, ticket_sequence};
use crate::utils::validation::{
    MAX_ITEMS_PER_REQUEST, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};

#[derive(Clone)]
pub struct AccountEngine {
    pool: SqlitePool,
}

impl AccountEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load(&self, id: i64) -> AccountResult<Account> {
        account::find_by_id(&self.pool, id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Persist outside a transaction, bumping the in-memory version
    async fn persist(&self, acc: &mut Account) -> AccountResult<()> {
        acc.version = account::save(&self.pool, acc)
            .await
            .map_err(|e| save_error(e, acc))?;
        Ok(())
    }

    /// Open a new account on a table
    pub async fn open(&self, data: AccountOpen) -> AccountResult<Account> {
        if data.table_number < 1 {
            return Err(AccountError::Validation(format!(
                "tableNumber must be >= 1, got {}",
                data.table_number
            )));
        }
        validate_required_text(&data.server, "server", MAX_NAME_LEN)?;
        validate_required_text(&data.tenant, "tenant", MAX_NAME_LEN)?;
        validate_optional_text(&data.label, "label", MAX_NAME_LEN)?;

        let tenant = data.tenant.trim().to_string();
        let label = data
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        // Sequence write first: takes the write lock before the occupancy check
        let ticket_number = ticket_sequence::next_value(&mut *tx, &tenant).await?;

        if account::find_open_on_table(&mut *tx, &tenant, data.table_number)
            .await?
            .is_some()
        {
            // Dropping the transaction rolls the sequence back
            return Err(AccountError::TableOccupied(data.table_number));
        }

        let acc = Account {
            id: snowflake_id(),
            ticket_number,
            table: TableRef {
                table_number: data.table_number,
                label,
            },
            server: data.server.trim().to_string(),
            items: Vec::new(),
            subtotal: 0.0,
            state: AccountState::Open,
            tenant_key: tenant.clone(),
            opened_at: now_millis(),
            closed_at: None,
            payment_method: None,
            amount_paid: 0.0,
            version: 0,
        };

        account::insert(&mut *tx, &acc).await.map_err(|e| match e {
            RepoError::Duplicate(_) => AccountError::TableOccupied(data.table_number),
            other => other.into(),
        })?;

        let table_known = dining_table::set_active(&mut *tx, &tenant, data.table_number, true).await?;
        tx.commit().await.map_err(RepoError::from)?;

        if !table_known {
            tracing::warn!(
                tenant = %tenant,
                table_number = data.table_number,
                "Opened account on a table missing from the registry"
            );
        }
        tracing::info!(
            account_id = acc.id,
            tenant = %tenant,
            table_number = data.table_number,
            ticket_number,
            "Account opened"
        );
        Ok(acc)
    }

    /// Append catalog-priced items to an open account
    pub async fn add_items(&self, id: i64, inputs: Vec<AccountItemInput>) -> AccountResult<Account> {
        if inputs.is_empty() {
            return Err(AccountError::EmptyItems);
        }
        if inputs.len() > MAX_ITEMS_PER_REQUEST {
            return Err(AccountError::Validation(format!(
                "too many items ({}, max {MAX_ITEMS_PER_REQUEST})",
                inputs.len()
            )));
        }
        for input in &inputs {
            pricing::validate_input(input)?;
        }

        let mut acc = self.load(id).await?;
        lifecycle::ensure_open(&acc)?;

        let mut catalog: HashMap<i64, Product> = HashMap::new();
        let mut items = Vec::with_capacity(inputs.len());
        for input in &inputs {
            if !catalog.contains_key(&input.product_id) {
                let found = product::find_by_id(&self.pool, &acc.tenant_key, input.product_id)
                    .await?
                    .ok_or(AccountError::ProductNotFound(input.product_id))?;
                catalog.insert(input.product_id, found);
            }
            if let Some(p) = catalog.get(&input.product_id) {
                items.push(pricing::price_item(p, input)?);
            }
        }

        let added = items.len();
        lifecycle::append_items(&mut acc, items)?;
        self.persist(&mut acc).await?;

        tracing::debug!(account_id = id, added, "Items added");
        Ok(acc)
    }

    /// Send items to the kitchen.
    ///
    /// Stock decrements are best-effort per item: a failed decrement is
    /// reported in that item's result and never un-commits it or its siblings.
    pub async fn commit_to_kitchen(
        &self,
        id: i64,
        item_ids: Vec<String>,
    ) -> AccountResult<CommitResponse> {
        let mut acc = self.load(id).await?;
        let (marks, draws) = lifecycle::commit_items(&mut acc, &item_ids, now_millis())?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        acc.version = account::save(&mut *tx, &acc)
            .await
            .map_err(|e| save_error(e, &acc))?;

        let mut stock: HashMap<String, Result<(), String>> = HashMap::new();
        for draw in &draws {
            let outcome = match product::decrement_stock(
                &mut *tx,
                &acc.tenant_key,
                draw.product_id,
                i64::from(draw.quantity),
            )
            .await
            {
                Ok(true) => Ok(()),
                Ok(false) => Err(format!("product {} not found, stock not updated", draw.product_id)),
                Err(e) => Err(format!("stock update failed: {e}")),
            };
            if let Err(reason) = &outcome {
                tracing::warn!(
                    account_id = id,
                    item_id = %draw.item_id,
                    product_id = draw.product_id,
                    reason = %reason,
                    "Stock decrement failed for committed item"
                );
            }
            stock.insert(draw.item_id.clone(), outcome);
        }
        tx.commit().await.map_err(RepoError::from)?;

        let results: Vec<ItemCommitResult> = marks
            .into_iter()
            .map(|mark| {
                let (stock_updated, error) = match (mark.status, stock.get(&mark.item_id)) {
                    (CommitStatus::Committed, Some(Ok(()))) => (true, None),
                    (CommitStatus::Committed, Some(Err(reason))) => (false, Some(reason.clone())),
                    (CommitStatus::NotFound, _) => (false, Some("item not found".to_string())),
                    _ => (false, None),
                };
                ItemCommitResult {
                    item_id: mark.item_id,
                    status: mark.status,
                    stock_updated,
                    error,
                }
            })
            .collect();

        tracing::info!(
            account_id = id,
            committed = draws.len(),
            subtotal = acc.subtotal,
            "Items sent to kitchen"
        );
        Ok(CommitResponse {
            account: acc,
            results,
        })
    }

    /// Remove an item that has not been sent to the kitchen
    pub async fn remove_item(&self, id: i64, item_id: &str) -> AccountResult<Account> {
        let mut acc = self.load(id).await?;
        lifecycle::remove_item(&mut acc, item_id)?;
        self.persist(&mut acc).await?;
        tracing::debug!(account_id = id, item_id = %item_id, "Item removed");
        Ok(acc)
    }

    pub async fn finalize(&self, id: i64) -> AccountResult<Account> {
        let mut acc = self.load(id).await?;
        lifecycle::finalize(&mut acc)?;
        self.persist(&mut acc).await?;
        tracing::info!(account_id = id, ticket_number = acc.ticket_number, "Account finalized");
        Ok(acc)
    }

    pub async fn reopen(&self, id: i64) -> AccountResult<Account> {
        let mut acc = self.load(id).await?;
        lifecycle::reopen(&mut acc)?;

        if let Some(other) =
            account::find_open_on_table(&self.pool, &acc.tenant_key, acc.table.table_number).await?
            && other.id != acc.id
        {
            return Err(AccountError::TableOccupied(acc.table.table_number));
        }

        acc.version = account::save(&self.pool, &acc).await.map_err(|e| match e {
            RepoError::Duplicate(_) => AccountError::TableOccupied(acc.table.table_number),
            other => save_error(other, &acc),
        })?;
        tracing::info!(account_id = id, "Account reopened");
        Ok(acc)
    }

    /// Settle the account and free its table unless another account holds it.
    ///
    /// No cash movement is written: sales are always derived from closed
    /// accounts by the ledger.
    pub async fn close(&self, id: i64, data: CloseRequest) -> AccountResult<Account> {
        let method: PaymentMethod = data
            .payment_method
            .parse()
            .map_err(|_| AccountError::InvalidPaymentMethod(data.payment_method.clone()))?;

        let mut acc = self.load(id).await?;
        lifecycle::close(&mut acc, method, data.amount_paid, now_millis())?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        acc.version = account::save(&mut *tx, &acc)
            .await
            .map_err(|e| save_error(e, &acc))?;
        // A newer account may already be open on the same table
        let still_held = account::exists_active_on_table(
            &mut *tx,
            &acc.tenant_key,
            acc.table.table_number,
            acc.id,
        )
        .await?;
        if !still_held {
            dining_table::set_active(&mut *tx, &acc.tenant_key, acc.table.table_number, false)
                .await?;
        }
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            account_id = id,
            ticket_number = acc.ticket_number,
            payment_method = %method,
            subtotal = acc.subtotal,
            amount_paid = acc.amount_paid,
            "Account closed"
        );
        Ok(acc)
    }

    pub async fn get_detail(&self, id: i64) -> AccountResult<Account> {
        self.load(id).await
    }

    /// Open and finalized accounts, newest first
    pub async fn list_by_tenant(&self, tenant: &str) -> AccountResult<Vec<Account>> {
        Ok(account::list_active(&self.pool, tenant).await?)
    }
}

fn save_error(err: RepoError, acc: &Account) -> AccountError {
    match err {
        RepoError::VersionConflict(_) => AccountError::ConcurrentModification(acc.id),
        other => other.into(),
    }
}
