//! Account state machine
//!
//! Pure mutations of an in-memory aggregate. Persistence is the engine's job.
//!
//! ```text
//! open ──finalize──▶ finalized ──close──▶ closed
//!   ▲                    │
//!   └──────reopen────────┘
//! ```

use shared::models::{Account, AccountItem, AccountState, CommitStatus, PaymentMethod};

use super::error::{AccountError, AccountResult};
use super::pricing::committed_subtotal;
use crate::money::MAX_AMOUNT;

/// Stock to take from the catalog for a freshly committed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDraw {
    pub item_id: String,
    pub product_id: i64,
    pub quantity: i32,
}

/// Result of committing one requested item id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMark {
    pub item_id: String,
    pub status: CommitStatus,
}

pub fn ensure_open(account: &Account) -> AccountResult<()> {
    if account.state != AccountState::Open {
        return Err(AccountError::NotOpen {
            id: account.id,
            state: account.state,
        });
    }
    Ok(())
}

pub fn ensure_finalized(account: &Account) -> AccountResult<()> {
    if account.state != AccountState::Finalized {
        return Err(AccountError::NotFinalized {
            id: account.id,
            state: account.state,
        });
    }
    Ok(())
}

/// Append priced, uncommitted items. Subtotal is untouched.
pub fn append_items(account: &mut Account, items: Vec<AccountItem>) -> AccountResult<()> {
    ensure_open(account)?;
    if items.is_empty() {
        return Err(AccountError::EmptyItems);
    }
    account.items.extend(items);
    Ok(())
}

/// Mark the requested items committed.
///
/// Already-committed ids are reported and skipped, so a repeated commit
/// never yields a second stock draw. The subtotal is recomputed from scratch.
pub fn commit_items(
    account: &mut Account,
    item_ids: &[String],
    now: i64,
) -> AccountResult<(Vec<CommitMark>, Vec<StockDraw>)> {
    ensure_open(account)?;
    if item_ids.is_empty() {
        return Err(AccountError::Validation("itemIds must not be empty".into()));
    }

    let mut marks = Vec::with_capacity(item_ids.len());
    let mut draws = Vec::new();

    for item_id in item_ids {
        let status = match account.items.iter_mut().find(|i| &i.id == item_id) {
            None => CommitStatus::NotFound,
            Some(item) if item.committed => CommitStatus::AlreadyCommitted,
            Some(item) => {
                item.committed = true;
                item.committed_at = Some(now);
                draws.push(StockDraw {
                    item_id: item.id.clone(),
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
                CommitStatus::Committed
            }
        };
        marks.push(CommitMark {
            item_id: item_id.clone(),
            status,
        });
    }

    account.subtotal = committed_subtotal(&account.items);
    Ok((marks, draws))
}

/// Delete an uncommitted item
pub fn remove_item(account: &mut Account, item_id: &str) -> AccountResult<AccountItem> {
    ensure_open(account)?;
    let index = account
        .items
        .iter()
        .position(|i| i.id == item_id)
        .ok_or_else(|| AccountError::ItemNotFound(item_id.to_string()))?;
    if account.items[index].committed {
        return Err(AccountError::ItemCommitted(item_id.to_string()));
    }
    Ok(account.items.remove(index))
}

pub fn finalize(account: &mut Account) -> AccountResult<()> {
    ensure_open(account)?;
    account.state = AccountState::Finalized;
    Ok(())
}

pub fn reopen(account: &mut Account) -> AccountResult<()> {
    ensure_finalized(account)?;
    account.state = AccountState::Open;
    Ok(())
}

/// Settle a finalized account
pub fn close(
    account: &mut Account,
    method: PaymentMethod,
    amount_paid: f64,
    now: i64,
) -> AccountResult<()> {
    ensure_finalized(account)?;
    if !method.settles_accounts() {
        return Err(AccountError::InvalidPaymentMethod(method.to_string()));
    }
    if !amount_paid.is_finite() || amount_paid < 0.0 || amount_paid > MAX_AMOUNT {
        return Err(AccountError::InvalidAmount(format!(
            "amount paid must be between 0 and {MAX_AMOUNT}, got {amount_paid}"
        )));
    }
    account.state = AccountState::Closed;
    account.payment_method = Some(method);
    account.amount_paid = amount_paid;
    account.closed_at = Some(now);
    Ok(())
}
