//! Shared types for the Cravingo admin back office
//!
//! Domain models for the backend tables, lenient field decoding, money
//! rounding, the order metrics aggregator and the unified error system.

pub mod error;
pub mod metrics;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use metrics::{Metrics, PayoutLine, compute_metrics, compute_metrics_from_rows};
pub use money::round_money;
