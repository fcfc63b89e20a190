//! Cash aggregation
//!
//! Sales always come from closed accounts, never from stored movements.
//! An income movement that carries an account reference is listed in the
//! daily report but never counted as manual income.

use rust_decimal::Decimal;
use shared::models::{
    Account, AccountState, CashSummary, DailyTotals, LedgerEntry, Movement, MovementKind,
};

use crate::money::{to_decimal, to_f64};

/// Whether a movement counts as manual income / expense
fn is_manual(movement: &Movement) -> bool {
    match movement.kind {
        MovementKind::Income => movement.account_id.is_none(),
        MovementKind::Expense => true,
    }
}

/// Project a closed account into a synthetic income entry
pub fn sale_entry(account: &Account) -> LedgerEntry {
    LedgerEntry {
        id: account.id,
        kind: MovementKind::Income,
        description: format!(
            "Sale - Ticket #{} - {}",
            account.ticket_number,
            account.table.display_label()
        ),
        amount: account.subtotal,
        payment_method: account.payment_method,
        occurred_at: account.closed_at.unwrap_or(account.opened_at),
        account_id: Some(account.id),
        ticket_number: Some(account.ticket_number),
        is_sale: true,
    }
}

pub fn movement_entry(movement: &Movement) -> LedgerEntry {
    LedgerEntry {
        id: movement.id,
        kind: movement.kind,
        description: movement.description.clone(),
        amount: movement.amount,
        payment_method: Some(movement.payment_method),
        occurred_at: movement.occurred_at,
        account_id: movement.account_id,
        ticket_number: None,
        is_sale: false,
    }
}

#[derive(Default)]
struct Totals {
    sales: Decimal,
    income: Decimal,
    expenses: Decimal,
    income_count: i64,
    expense_count: i64,
}

impl Totals {
    fn collect<'a>(
        sales: impl IntoIterator<Item = f64>,
        movements: impl IntoIterator<Item = &'a Movement>,
    ) -> Self {
        let mut totals = Totals::default();
        for subtotal in sales {
            totals.sales += to_decimal(subtotal);
            totals.income_count += 1;
        }
        for m in movements.into_iter().filter(|m| is_manual(m)) {
            match m.kind {
                MovementKind::Income => {
                    totals.income += to_decimal(m.amount);
                    totals.income_count += 1;
                }
                MovementKind::Expense => {
                    totals.expenses += to_decimal(m.amount);
                    totals.expense_count += 1;
                }
            }
        }
        totals
    }

    fn balance(&self) -> Decimal {
        self.sales + self.income - self.expenses
    }
}

/// Lifetime cash position from closed-account subtotals and every movement
pub fn summarize(closed_subtotals: &[f64], movements: &[Movement]) -> CashSummary {
    let totals = Totals::collect(closed_subtotals.iter().copied(), movements);
    CashSummary {
        manual_income: to_f64(totals.income),
        expenses: to_f64(totals.expenses),
        sales: to_f64(totals.sales),
        balance: to_f64(totals.balance()),
        income_count: totals.income_count,
        expense_count: totals.expense_count,
    }
}

/// Merge one day's closed accounts and movements, newest first
pub fn merge_daily(closed: &[Account], movements: &[Movement]) -> (Vec<LedgerEntry>, DailyTotals) {
    let mut entries: Vec<LedgerEntry> = closed
        .iter()
        .filter(|a| a.state == AccountState::Closed)
        .map(sale_entry)
        .chain(movements.iter().map(movement_entry))
        .collect();
    entries.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    let sales = closed
        .iter()
        .filter(|a| a.state == AccountState::Closed)
        .map(|a| a.subtotal);
    let totals = Totals::collect(sales, movements);
    let daily = DailyTotals {
        sales: to_f64(totals.sales),
        income: to_f64(totals.income),
        expenses: to_f64(totals.expenses),
        balance: to_f64(totals.balance()),
    };
    (entries, daily)
}
