//! Shared types for Comanda
//!
//! Common types used by the server and its clients: domain models,
//! the unified error system, the response envelope and small utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use response::ApiResponse;
