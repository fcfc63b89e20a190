//! Unified error codes for Comanda
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Account (tab) errors
//! - 5xxx: Payment / cash ledger errors
//! - 6xxx: Catalog errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Account ====================
    /// Account not found
    AccountNotFound = 4001,
    /// Operation requires an open account
    AccountNotOpen = 4002,
    /// Operation requires a finalized account
    AccountNotFinalized = 4003,
    /// Account item not found
    AccountItemNotFound = 4004,
    /// Item was already sent to the kitchen
    ItemAlreadyCommitted = 4005,
    /// No items supplied
    AccountItemsEmpty = 4006,
    /// Account was modified by another request
    ConcurrentModification = 4007,

    // ==================== 5xxx: Payment / Ledger ====================
    /// Invalid payment method
    PaymentInvalidMethod = 5001,
    /// Invalid amount (negative, NaN, out of range)
    InvalidAmount = 5002,
    /// Cash movement not found
    MovementNotFound = 5101,
    /// Cash movement kind is not income/expense
    InvalidMovementKind = 5102,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Extra unknown or disabled for this product
    ExtraNotAvailable = 6002,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table already has an open account
    TableOccupied = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Account
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::AccountNotOpen => "Account is not open",
            ErrorCode::AccountNotFinalized => "Account is not finalized",
            ErrorCode::AccountItemNotFound => "Account item not found",
            ErrorCode::ItemAlreadyCommitted => "Item was already sent to the kitchen",
            ErrorCode::AccountItemsEmpty => "At least one item is required",
            ErrorCode::ConcurrentModification => "Account was modified concurrently, retry",

            // Payment / Ledger
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::MovementNotFound => "Cash movement not found",
            ErrorCode::InvalidMovementKind => "Movement kind must be income or expense",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ExtraNotAvailable => "Extra is not available for this product",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOccupied => "Table already has an open account",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Account
            4001 => Ok(ErrorCode::AccountNotFound),
            4002 => Ok(ErrorCode::AccountNotOpen),
            4003 => Ok(ErrorCode::AccountNotFinalized),
            4004 => Ok(ErrorCode::AccountItemNotFound),
            4005 => Ok(ErrorCode::ItemAlreadyCommitted),
            4006 => Ok(ErrorCode::AccountItemsEmpty),
            4007 => Ok(ErrorCode::ConcurrentModification),

            // Payment / Ledger
            5001 => Ok(ErrorCode::PaymentInvalidMethod),
            5002 => Ok(ErrorCode::InvalidAmount),
            5101 => Ok(ErrorCode::MovementNotFound),
            5102 => Ok(ErrorCode::InvalidMovementKind),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ExtraNotAvailable),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
