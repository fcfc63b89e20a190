//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All entity IDs are `i64` snowflakes; account item IDs are UUID strings.

pub mod account;
pub mod dining_table;
pub mod movement;
pub mod product;
pub mod report;

// Re-exports
pub use account::*;
pub use dining_table::*;
pub use movement::*;
pub use product::*;
pub use report::*;
