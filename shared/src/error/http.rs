//! Error kind and HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Caller-facing error taxonomy
///
/// Every [`ErrorCode`] belongs to exactly one kind; the kind decides the
/// HTTP status. State conflicts deliberately use 400, not 409.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed input
    Validation,
    /// Entity does not exist
    NotFound,
    /// Operation illegal for the current lifecycle state
    InvalidState,
    /// Uniqueness or business-rule violation
    Conflict,
    /// Storage or runtime failure
    Unexpected,
}

impl ErrorKind {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation | Self::InvalidState | Self::Conflict => StatusCode::BAD_REQUEST,
        }
    }
}

impl ErrorCode {
    /// Classify this code into the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            // Success never reaches an error path; treat as validation for totality
            Self::Success
            | Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::AccountItemsEmpty
            | Self::PaymentInvalidMethod
            | Self::InvalidAmount
            | Self::InvalidMovementKind
            | Self::ExtraNotAvailable => ErrorKind::Validation,

            Self::NotFound
            | Self::AccountNotFound
            | Self::AccountItemNotFound
            | Self::MovementNotFound
            | Self::ProductNotFound
            | Self::TableNotFound => ErrorKind::NotFound,

            Self::AccountNotOpen | Self::AccountNotFinalized => ErrorKind::InvalidState,

            Self::AlreadyExists
            | Self::ItemAlreadyCommitted
            | Self::ConcurrentModification
            | Self::TableOccupied => ErrorKind::Conflict,

            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                ErrorKind::Unexpected
            }
        }
    }

    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            _ => self.kind().http_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::AccountNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::MovementNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::AccountNotOpen.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::TableOccupied.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ItemAlreadyCommitted.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ErrorCode::AccountNotFinalized.kind(), ErrorKind::InvalidState);
        assert_eq!(ErrorCode::TableOccupied.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::ExtraNotAvailable.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::InternalError.kind(), ErrorKind::Unexpected);
    }
}
