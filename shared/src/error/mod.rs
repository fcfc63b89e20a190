//! Unified error system for Comanda
//!
//! - [`ErrorCode`]: Standardized numeric codes for every failure
//! - [`ErrorKind`]: Caller-facing taxonomy (validation, not found, invalid state, conflict, unexpected)
//! - [`ErrorCategory`]: Classification of codes by domain range
//! - [`AppError`]: Rich error type with code, message and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Account errors
//! - 5xxx: Payment / ledger errors
//! - 6xxx: Catalog errors
//! - 7xxx: Table errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::AccountNotFound);
//! let err = AppError::validation("tableNumber must be >= 1")
//!     .with_detail("field", "tableNumber");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use http::ErrorKind;
pub use types::{AppError, AppResult};
