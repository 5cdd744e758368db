//! Expense Repository

use std::sync::Arc;

use shared::error::{AppResult, ErrorCode};
use shared::models::{Expense, ExpenseList, decode_row};

use super::{FETCH_ALL_LIMIT, operation_error};
use crate::appwrite::{Query, TablesApi};

#[derive(Clone)]
pub struct ExpenseRepository {
    tables: Arc<dyn TablesApi>,
    table_id: String,
}

impl ExpenseRepository {
    pub fn new(tables: Arc<dyn TablesApi>, table_id: impl Into<String>) -> Self {
        Self {
            tables,
            table_id: table_id.into(),
        }
    }

    /// Fetch every expense row
    pub async fn list_all(&self) -> AppResult<ExpenseList> {
        let list = self
            .tables
            .list_rows(&self.table_id, &[Query::limit(FETCH_ALL_LIMIT)])
            .await
            .map_err(operation_error(ErrorCode::ExpenseFetchFailed))?;

        let total = list.total;
        let expenses: Vec<Expense> = list
            .into_rows("expense")
            .into_iter()
            .map(|row| decode_row(row, "expense"))
            .collect();
        tracing::debug!(fetched = expenses.len(), total, "Fetched expenses");
        Ok(ExpenseList { expenses, total })
    }
}
