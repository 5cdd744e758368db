//! Order Repository

use std::sync::Arc;

use serde::Serialize;
use shared::error::{AppResult, ErrorCode};
use shared::models::{OrderRecord, StatusFilter};

use super::{FETCH_ALL_LIMIT, operation_error};
use crate::appwrite::{Query, TablesApi};

/// Orders matching a query, `items` already decoded
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderList {
    pub orders: Vec<OrderRecord>,
    pub total: u64,
}

#[derive(Clone)]
pub struct OrderRepository {
    tables: Arc<dyn TablesApi>,
    table_id: String,
}

impl OrderRepository {
    pub fn new(tables: Arc<dyn TablesApi>, table_id: impl Into<String>) -> Self {
        Self {
            tables,
            table_id: table_id.into(),
        }
    }

    /// Fetch orders created within `[start, end]`, newest first
    ///
    /// Bounds are ISO-8601 UTC strings; `None` leaves that side open.
    pub async fn query(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        status: &StatusFilter,
    ) -> AppResult<OrderList> {
        let queries = order_queries(start, end, status);
        let list = self
            .tables
            .list_rows(&self.table_id, &queries)
            .await
            .map_err(operation_error(ErrorCode::OrderFetchFailed))?;

        let total = list.total;
        let orders: Vec<OrderRecord> = list
            .into_rows("order")
            .into_iter()
            .map(OrderRecord::from_row)
            .collect();
        tracing::debug!(
            start = ?start,
            end = ?end,
            status = %status,
            fetched = orders.len(),
            total,
            "Fetched orders"
        );
        Ok(OrderList { orders, total })
    }
}

pub(crate) fn order_queries(start: Option<&str>, end: Option<&str>, status: &StatusFilter) -> Vec<Query> {
    let mut queries = Vec::with_capacity(6);
    if let Some(start) = start {
        queries.push(Query::greater_than_equal("$createdAt", start));
    }
    if let Some(end) = end {
        queries.push(Query::less_than_equal("$createdAt", end));
    }
    if let Some(status) = status.status() {
        queries.push(Query::equal("orderStatus", status.as_str()));
    }
    queries.push(Query::order_desc("$createdAt"));
    queries.push(Query::limit(FETCH_ALL_LIMIT));
    queries.push(Query::select(&["*", "deliveryAgentId.*", "restaurantId.*"]));
    queries
}
