use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

/// Cash ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Cash movement {0} not found")]
    MovementNotFound(i64),

    #[error("Invalid movement kind: '{0}'")]
    InvalidKind(String),

    #[error("Invalid payment method: '{0}'")]
    InvalidPaymentMethod(String),

    #[error("{0}")]
    InvalidAmount(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::MovementNotFound(id) => {
                AppError::with_message(ErrorCode::MovementNotFound, message)
                    .with_detail("movementId", id)
            }
            LedgerError::InvalidKind(kind) => {
                AppError::with_message(ErrorCode::InvalidMovementKind, message)
                    .with_detail("kind", kind)
            }
            LedgerError::InvalidPaymentMethod(_) => {
                AppError::with_message(ErrorCode::PaymentInvalidMethod, message)
            }
            LedgerError::InvalidAmount(_) => AppError::with_message(ErrorCode::InvalidAmount, message),
            LedgerError::Validation(_) => AppError::validation(message),
            LedgerError::Repo(e) => e.into(),
            LedgerError::App(e) => e,
        }
    }
}
