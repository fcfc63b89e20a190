//! Cash ledger (现金账)
//!
//! Manual movements are stored; sales are derived from closed accounts at
//! read time so a closed account is never counted twice.

mod error;
mod service;
pub mod summary;

pub use error::{LedgerError, LedgerResult};
pub use service::LedgerService;
