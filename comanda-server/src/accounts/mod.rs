//! Account (tab) lifecycle
//!
//! - [`lifecycle`]: pure state machine over the aggregate
//! - [`pricing`]: catalog snapshot and line totals
//! - [`engine`]: units of work against the database

mod engine;
mod error;
pub mod lifecycle;
pub mod pricing;


pub use engine::AccountEngine;
pub use error::{AccountError, AccountResult};
