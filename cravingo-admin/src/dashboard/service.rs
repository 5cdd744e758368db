//! Dashboard refresh
//!
//! One refresh runs strictly in sequence: fetch orders, fetch expenses,
//! aggregate. Every refresh takes a ticket from a monotonically increasing
//! counter; when it finishes, its snapshot is published only if no newer
//! refresh has been requested in the meantime (last-requested-wins).
//! In-flight requests are never cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::AppResult;
use shared::metrics::{Metrics, PayoutLine, agent_payouts, compute_metrics, restaurant_payouts};
use shared::models::{FilterState, OrderSummary};
use shared::money::round_money;

use super::filter::QueryBounds;
use crate::repository::{ExpenseRepository, OrderRepository};
use crate::utils::time::today_in;

/// Everything the dashboard shows for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Ticket of the refresh that produced this snapshot
    pub sequence: u64,
    pub filter: FilterState,
    pub description: String,
    pub bounds: QueryBounds,
    pub metrics: Metrics,
    /// Sum of all expenses, whether or not it was deducted
    pub expense_total: Decimal,
    pub agent_payouts: Vec<PayoutLine>,
    pub restaurant_payouts: Vec<PayoutLine>,
    pub orders: Vec<OrderSummary>,
    pub generated_at: DateTime<Utc>,
}

pub struct DashboardService {
    orders: OrderRepository,
    expenses: ExpenseRepository,
    timezone: Tz,
    sequence: AtomicU64,
    latest: RwLock<Option<Arc<DashboardSnapshot>>>,
}

impl DashboardService {
    pub fn new(orders: OrderRepository, expenses: ExpenseRepository, timezone: Tz) -> Self {
        Self {
            orders,
            expenses,
            timezone,
            sequence: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.latest.read().clone()
    }

    pub async fn refresh(&self, filter: &FilterState) -> AppResult<Option<Arc<DashboardSnapshot>>> {
        self.refresh_at(filter, Utc::now()).await
    }

    /// Refresh as of `now`
    ///
    /// Returns `Ok(None)` when a newer refresh was requested while this one
    /// was in flight; its result is dropped. A failed fetch publishes nothing.
    pub async fn refresh_at(
        &self,
        filter: &FilterState,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Arc<DashboardSnapshot>>> {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let today = today_in(self.timezone, now);
        let bounds = QueryBounds::resolve(filter, today, self.timezone);
        tracing::debug!(ticket, filter = %filter.describe(), "Dashboard refresh started");

        let start = bounds.start_iso();
        let end = bounds.end_iso();
        let order_list = self
            .orders
            .query(start.as_deref(), end.as_deref(), &filter.status_filter)
            .await?;
        let expense_list = self.expenses.list_all().await?;
        let expense_total = expense_list.expense_total();

        let orders = &order_list.orders;
        let metrics = compute_metrics(orders, filter.date_filter, &filter.status_filter, expense_total);
        let snapshot = Arc::new(DashboardSnapshot {
            sequence: ticket,
            filter: filter.clone(),
            description: filter.describe(),
            bounds,
            metrics,
            expense_total: round_money(expense_total),
            agent_payouts: agent_payouts(orders),
            restaurant_payouts: restaurant_payouts(orders),
            orders: orders.iter().map(OrderSummary::from_order).collect(),
            generated_at: now,
        });

        let mut latest = self.latest.write();
        let newest = self.sequence.load(Ordering::SeqCst);
        if ticket != newest {
            tracing::debug!(ticket, newest, "Discarding stale dashboard refresh");
            return Ok(None);
        }
        *latest = Some(snapshot.clone());
        drop(latest);

        tracing::info!(
            ticket,
            orders = snapshot.metrics.total_orders,
            profit = %snapshot.metrics.total_profit,
            "Dashboard refreshed"
        );
        Ok(Some(snapshot))
    }
}
