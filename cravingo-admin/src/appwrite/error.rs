//! Appwrite client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Appwrite client error type
#[derive(Debug, Error)]
pub enum AppwriteError {
    /// Transport failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request
    #[error("Appwrite error {status} ({kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    /// Response body had an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Appwrite calls
pub type AppwriteResult<T> = Result<T, AppwriteError>;

impl AppwriteError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::Timeout,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api { status: 401, .. } => ErrorCode::NotAuthenticated,
            Self::Api { status: 403, .. } => ErrorCode::PermissionDenied,
            Self::Api { status: 404, .. } => ErrorCode::NotFound,
            Self::Api { .. } => ErrorCode::BackendError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidResponse,
        }
    }
}

impl From<AppwriteError> for AppError {
    fn from(err: AppwriteError) -> Self {
        let code = err.code();
        match err {
            AppwriteError::Api {
                status,
                kind,
                message,
            } => AppError::with_message(code, message)
                .with_detail("status", status)
                .with_detail("type", kind),
            other => AppError::with_message(code, other.to_string()),
        }
    }
}
