use shared::error::{AppError, ErrorCode};
use shared::models::AccountState;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Account engine errors
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account {0} not found")]
    NotFound(i64),

    #[error("Account {id} is {state}, expected open")]
    NotOpen { id: i64, state: AccountState },

    #[error("Account {id} is {state}, expected finalized")]
    NotFinalized { id: i64, state: AccountState },

    #[error("Item {0} not found in account")]
    ItemNotFound(String),

    #[error("Item {0} was already sent to the kitchen")]
    ItemCommitted(String),

    #[error("Table {0} already has an open account")]
    TableOccupied(i32),

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Extra '{extra_id}' is not available for product {product_id}")]
    ExtraNotAvailable { product_id: i64, extra_id: String },

    #[error("Invalid payment method: '{0}'")]
    InvalidPaymentMethod(String),

    #[error("{0}")]
    InvalidAmount(String),

    #[error("At least one item is required")]
    EmptyItems,

    #[error("{0}")]
    Validation(String),

    #[error("Account {0} was modified by another request")]
    ConcurrentModification(i64),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type AccountResult<T> = Result<T, AccountError>;

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        match err {
            AccountError::NotFound(id) => {
                AppError::with_message(ErrorCode::AccountNotFound, message).with_detail("accountId", id)
            }
            AccountError::NotOpen { state, .. } => {
                AppError::with_message(ErrorCode::AccountNotOpen, message)
                    .with_detail("state", state.as_str())
            }
            AccountError::NotFinalized { state, .. } => {
                AppError::with_message(ErrorCode::AccountNotFinalized, message)
                    .with_detail("state", state.as_str())
            }
            AccountError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::AccountItemNotFound, message)
                    .with_detail("itemId", id)
            }
            AccountError::ItemCommitted(id) => {
                AppError::with_message(ErrorCode::ItemAlreadyCommitted, message)
                    .with_detail("itemId", id)
            }
            AccountError::TableOccupied(table) => {
                AppError::with_message(ErrorCode::TableOccupied, message)
                    .with_detail("tableNumber", table)
            }
            AccountError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message)
                    .with_detail("productId", id)
            }
            AccountError::ExtraNotAvailable { extra_id, .. } => {
                AppError::with_message(ErrorCode::ExtraNotAvailable, message)
                    .with_detail("extraId", extra_id)
            }
            AccountError::InvalidPaymentMethod(_) => {
                AppError::with_message(ErrorCode::PaymentInvalidMethod, message)
            }
            AccountError::InvalidAmount(_) => AppError::with_message(ErrorCode::InvalidAmount, message),
            AccountError::EmptyItems => AppError::new(ErrorCode::AccountItemsEmpty),
            AccountError::Validation(_) => AppError::validation(message),
            AccountError::ConcurrentModification(id) => {
                AppError::with_message(ErrorCode::ConcurrentModification, message)
                    .with_detail("accountId", id)
            }
            AccountError::Repo(e) => e.into(),
            AccountError::App(e) => e,
        }
    }
}
