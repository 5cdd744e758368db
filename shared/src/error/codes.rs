//! Unified error codes for the Cravingo admin workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Expense and wallet errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize compactly
/// and can be matched on by any consumer of the snapshot JSON.
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

    // ==================== 1xxx: Auth ====================
    /// Backend rejected the project credentials
    NotAuthenticated = 1001,
    /// API key lacks the scope for this operation
    PermissionDenied = 1002,

    // ==================== 4xxx: Order ====================
    /// Fetching orders failed
    OrderFetchFailed = 4001,
    /// Order not found
    OrderNotFound = 4002,

    // ==================== 5xxx: Expense ====================
    /// Fetching expenses failed
    ExpenseFetchFailed = 5001,
    /// Fetching restaurant wallets failed
    WalletFetchFailed = 5002,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Listing products failed
    ProductListFailed = 6002,
    /// Creating a product failed
    ProductCreateFailed = 6003,
    /// Updating a product failed
    ProductUpdateFailed = 6004,
    /// Deleting a product failed
    ProductDeleteFailed = 6005,
    /// Deleting a product image failed
    ImageDeleteFailed = 6006,
    /// Product quantity options are incomplete
    InvalidQuantityOption = 6007,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration missing or invalid
    ConfigError = 9002,
    /// Network failure talking to the backend
    NetworkError = 9101,
    /// Backend returned an unexpected error
    BackendError = 9102,
    /// Backend response could not be decoded
    InvalidResponse = 9103,
    /// Request timed out
    Timeout = 9104,
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

            // Auth
            ErrorCode::NotAuthenticated => "Backend rejected the project credentials",
            ErrorCode::PermissionDenied => "Permission denied",

            // Order
            ErrorCode::OrderFetchFailed => "Failed to fetch orders",
            ErrorCode::OrderNotFound => "Order not found",

            // Expense
            ErrorCode::ExpenseFetchFailed => "Failed to fetch expenses",
            ErrorCode::WalletFetchFailed => "Failed to fetch restaurant wallets",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductListFailed => "Failed to list products",
            ErrorCode::ProductCreateFailed => "Failed to create product",
            ErrorCode::ProductUpdateFailed => "Failed to update product",
            ErrorCode::ProductDeleteFailed => "Failed to delete product",
            ErrorCode::ImageDeleteFailed => "Failed to delete product image",
            ErrorCode::InvalidQuantityOption => "Quantity option is incomplete",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::BackendError => "Backend error",
            ErrorCode::InvalidResponse => "Invalid backend response",
            ErrorCode::Timeout => "Request timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
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

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::PermissionDenied),

            // Order
            4001 => Ok(ErrorCode::OrderFetchFailed),
            4002 => Ok(ErrorCode::OrderNotFound),

            // Expense
            5001 => Ok(ErrorCode::ExpenseFetchFailed),
            5002 => Ok(ErrorCode::WalletFetchFailed),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductListFailed),
            6003 => Ok(ErrorCode::ProductCreateFailed),
            6004 => Ok(ErrorCode::ProductUpdateFailed),
            6005 => Ok(ErrorCode::ProductDeleteFailed),
            6006 => Ok(ErrorCode::ImageDeleteFailed),
            6007 => Ok(ErrorCode::InvalidQuantityOption),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::NetworkError),
            9102 => Ok(ErrorCode::BackendError),
            9103 => Ok(ErrorCode::InvalidResponse),
            9104 => Ok(ErrorCode::Timeout),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OrderFetchFailed.code(), 4001);
        assert_eq!(ErrorCode::ExpenseFetchFailed.code(), 5001);
        assert_eq!(ErrorCode::ProductUpdateFailed.code(), 6004);
        assert_eq!(ErrorCode::NetworkError.code(), 9101);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::NotAuthenticated,
            ErrorCode::PermissionDenied,
            ErrorCode::OrderFetchFailed,
            ErrorCode::OrderNotFound,
            ErrorCode::ExpenseFetchFailed,
            ErrorCode::WalletFetchFailed,
            ErrorCode::ProductNotFound,
            ErrorCode::ProductListFailed,
            ErrorCode::ProductCreateFailed,
            ErrorCode::ProductUpdateFailed,
            ErrorCode::ProductDeleteFailed,
            ErrorCode::ImageDeleteFailed,
            ErrorCode::InvalidQuantityOption,
            ErrorCode::InternalError,
            ErrorCode::ConfigError,
            ErrorCode::NetworkError,
            ErrorCode::BackendError,
            ErrorCode::InvalidResponse,
            ErrorCode::Timeout,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::OrderFetchFailed.to_string(), "E4001");
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::ProductNotFound).unwrap();
        assert_eq!(json, "6001");
        let back: ErrorCode = serde_json::from_str("9104").unwrap();
        assert_eq!(back, ErrorCode::Timeout);
    }
}
