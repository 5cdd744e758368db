//! Data models
//!
//! Rows as returned by the backend tables. All string IDs are the backend's
//! opaque `$id`. Every model decodes leniently: a malformed attribute
//! degrades to zero/empty instead of failing the row.

pub mod expense;
pub mod filter;
pub mod order;
pub mod product;
pub mod relation;
pub mod restaurant_wallet;

// Re-exports
pub use expense::*;
pub use filter::*;
pub use order::*;
pub use product::*;
pub use relation::*;
pub use restaurant_wallet::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode one backend row, falling back to the model's default
///
/// Only a non-object row or a structurally impossible one hits the
/// fallback; individual bad fields are already absorbed by the field
/// decoders.
pub fn decode_row<T>(row: Value, kind: &'static str) -> T
where
    T: DeserializeOwned + Default,
{
    if !row.is_object() {
        tracing::warn!(kind, "Row is not an object, using empty record");
        return T::default();
    }
    serde_json::from_value(row).unwrap_or_else(|e| {
        tracing::warn!(kind, error = %e, "Failed to decode row, using empty record");
        T::default()
    })
}
