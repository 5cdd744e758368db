//! Appwrite REST boundary
//!
//! Repositories talk to the backend only through [`TablesApi`] and
//! [`StorageApi`]; [`AppwriteClient`] implements both over HTTP.

pub mod client;
pub mod error;
pub mod query;

#[cfg(test)]
pub(crate) mod fake;

pub use client::AppwriteClient;
pub use error::{AppwriteError, AppwriteResult};
pub use query::Query;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Body of a list-rows response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowList {
    #[serde(default)]
    pub total: u64,
    /// Kept raw; a non-list is handled by the caller
    #[serde(default)]
    pub rows: Value,
}

impl RowList {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            total: rows.len() as u64,
            rows: Value::Array(rows),
        }
    }

    /// Row objects, empty when the backend sent no list
    pub fn into_rows(self, kind: &'static str) -> Vec<Value> {
        match self.rows {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            _ => {
                tracing::warn!(kind, "Row list is not an array, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Row operations on tables of the configured database
#[async_trait]
pub trait TablesApi: Send + Sync {
    async fn list_rows(&self, table_id: &str, queries: &[Query]) -> AppwriteResult<RowList>;

    /// Create a row with a server-generated id
    async fn create_row(&self, table_id: &str, data: Value) -> AppwriteResult<Value>;

    async fn update_row(&self, table_id: &str, row_id: &str, data: Value) -> AppwriteResult<Value>;

    async fn delete_row(&self, table_id: &str, row_id: &str) -> AppwriteResult<()>;
}

/// File operations on storage buckets
#[async_trait]
pub trait StorageApi: Send + Sync {
    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> AppwriteResult<()>;
}
