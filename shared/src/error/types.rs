//! Error types and response envelope

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Re-code this error, prefixing the message with the operation that failed
    ///
    /// Keeps auth and timeout codes intact so callers can still tell a
    /// rejected API key from a generic failure.
    pub fn context(self, operation: ErrorCode) -> Self {
        let code = match self.code {
            ErrorCode::NotAuthenticated | ErrorCode::PermissionDenied | ErrorCode::Timeout => {
                self.code
            }
            _ => operation,
        };
        Self {
            code,
            message: format!("{}: {}", operation.message(), self.message),
            details: self.details,
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required field error
    pub fn required(field: impl Into<String>) -> Self {
        let f = field.into();
        Self::with_message(ErrorCode::RequiredField, format!("Please fill {}", f))
            .with_detail("field", f)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Unified response envelope
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::OrderFetchFailed);
        assert_eq!(err.message, "Failed to fetch orders");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_with_detail_accumulates() {
        let err = AppError::validation("bad option")
            .with_detail("row", 2)
            .with_detail("field", "label");
        let details = err.details.unwrap();
        assert_eq!(details.get("row"), Some(&Value::from(2)));
        assert_eq!(details.get("field"), Some(&Value::from("label")));
    }

    #[test]
    fn test_context_recodes_generic_failures() {
        let err = AppError::with_message(ErrorCode::BackendError, "row missing")
            .context(ErrorCode::ProductUpdateFailed);
        assert_eq!(err.code, ErrorCode::ProductUpdateFailed);
        assert_eq!(err.message, "Failed to update product: row missing");
    }

    #[test]
    fn test_context_keeps_auth_code() {
        let err = AppError::not_authenticated().context(ErrorCode::OrderFetchFailed);
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        assert_eq!(
            err.message,
            "Failed to fetch orders: Backend rejected the project credentials"
        );
    }

    #[test]
    fn test_required_message() {
        let err = AppError::required("category");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Please fill category");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = AppError::not_found("Product");
        let resp = ApiResponse::<()>::error(&err);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 3);
        assert_eq!(json["message"], "Product not found");
        assert!(json.get("data").is_none());
        assert_eq!(json["details"]["resource"], "Product");
    }

    #[test]
    fn test_success_response() {
        let resp = ApiResponse::success(vec![1, 2]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
