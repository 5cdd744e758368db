//! Order metrics aggregation
//!
//! Derives the dashboard KPIs from an already filtered list of orders. The
//! date and status filters are not applied here; they only decide whether
//! operating expenses come off the profit figure.
//!
//! All sums run on unrounded `Decimal` and are rounded once, when the
//! totals become [`Metrics`]. Sums that leave the `Decimal` range saturate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::models::{DateFilterKind, OrderRecord, RelatedRecord, StatusFilter, deducts_expenses};
use crate::money::{add_money, round_money, sub_money};


/// Dashboard KPI set
///
/// Currency fields always carry two decimal places and serialize as
/// strings (`"110.00"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_orders: u64,
    pub total_earnings: Decimal,
    pub total_delivery_agent_fee: Decimal,
    pub total_restaurant_revenue: Decimal,
    pub total_profit: Decimal,
}

impl Metrics {
    pub fn zeroed() -> Self {
        Totals::default().into_metrics(Decimal::ZERO)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[derive(Debug, Default)]
struct Totals {
    orders: u64,
    earnings: Decimal,
    delivery_agent_fee: Decimal,
    restaurant_revenue: Decimal,
}

impl Totals {
    fn add(&mut self, order: &OrderRecord) {
        self.orders += 1;
        self.earnings = add_money(self.earnings, order.earnings());
        self.delivery_agent_fee = add_money(self.delivery_agent_fee, order.delivery_agent_fee);
        self.restaurant_revenue = add_money(self.restaurant_revenue, order.restaurant_cost());
    }

    fn into_metrics(self, deduction: Decimal) -> Metrics {
        let profit = [self.delivery_agent_fee, self.restaurant_revenue, deduction]
            .into_iter()
            .fold(self.earnings, sub_money);
        Metrics {
            total_orders: self.orders,
            total_earnings: round_money(self.earnings),
            total_delivery_agent_fee: round_money(self.delivery_agent_fee),
            total_restaurant_revenue: round_money(self.restaurant_revenue),
            total_profit: round_money(profit),
        }
    }
}

/// Aggregate KPIs over `orders`
///
/// `expense_total` is subtracted from profit only for
/// (`DateFilterKind::All`, delivered); every other combination ignores it.
pub fn compute_metrics(
    orders: &[OrderRecord],
    date_filter: DateFilterKind,
    status_filter: &StatusFilter,
    expense_total: Decimal,
) -> Metrics {
    let mut totals = Totals::default();
    for order in orders {
        totals.add(order);
    }

    let deduction = if deducts_expenses(date_filter, status_filter) {
        expense_total
    } else {
        Decimal::ZERO
    };

    tracing::debug!(
        orders = totals.orders,
        date_filter = %date_filter,
        status_filter = %status_filter,
        expense_deducted = %deduction,
        "Computed order metrics"
    );
    totals.into_metrics(deduction)
}

/// Aggregate KPIs over raw backend rows
///
/// Anything other than a JSON array yields [`Metrics::zeroed`].
pub fn compute_metrics_from_rows(
    rows: &Value,
    date_filter: DateFilterKind,
    status_filter: &StatusFilter,
    expense_total: Decimal,
) -> Metrics {
    let Some(rows) = rows.as_array() else {
        tracing::warn!("Order rows are not a list, returning zeroed metrics");
        return Metrics::zeroed();
    };
    let orders: Vec<OrderRecord> = rows.iter().cloned().map(OrderRecord::from_row).collect();
    compute_metrics(&orders, date_filter, status_filter, expense_total)
}

/// Amount owed to one payee over a set of orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutLine {
    /// Relation id, `None` for orders without one
    pub id: Option<String>,
    pub name: Option<String>,
    pub orders: u64,
    pub amount: Decimal,
}

#[derive(Default)]
struct PayoutAccumulator {
    name: Option<String>,
    orders: u64,
    amount: Decimal,
}

fn group_payouts<F>(orders: &[OrderRecord], mut payee: F) -> Vec<PayoutLine>
where
    F: FnMut(&OrderRecord) -> (Option<&RelatedRecord>, Decimal),
{
    // None sorts first, so the unassigned line leads
    let mut groups: BTreeMap<Option<String>, PayoutAccumulator> = BTreeMap::new();
    for order in orders {
        let (relation, amount) = payee(order);
        let key = relation.and_then(|r| r.id.clone());
        let acc = groups.entry(key).or_default();
        if acc.name.is_none() {
            acc.name = relation.and_then(|r| r.name.clone());
        }
        acc.orders += 1;
        acc.amount = add_money(acc.amount, amount);
    }

    groups
        .into_iter()
        .map(|(id, acc)| PayoutLine {
            id,
            name: acc.name,
            orders: acc.orders,
            amount: round_money(acc.amount),
        })
        .collect()
}

/// `deliveryAgentFee` per delivery agent
pub fn agent_payouts(orders: &[OrderRecord]) -> Vec<PayoutLine> {
    group_payouts(orders, |o| (o.delivery_agent.as_ref(), o.delivery_agent_fee))
}

/// Restaurant cost per restaurant
pub fn restaurant_payouts(orders: &[OrderRecord]) -> Vec<PayoutLine> {
    group_payouts(orders, |o| (o.restaurant.as_ref(), o.restaurant_cost()))
}
