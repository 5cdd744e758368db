//! Expense Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::sum_money;
use crate::util::{lenient_decimal, lenient_string, lenient_string_or_empty};

/// Operating expense row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "$id", default, deserialize_with = "lenient_string_or_empty")]
    pub id: String,
    #[serde(rename = "Amount_paid", default, deserialize_with = "lenient_decimal")]
    pub amount_paid: Decimal,
    #[serde(rename = "$createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

/// Result of listing the expense table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
    pub total: u64,
}

impl ExpenseList {
    pub fn expense_total(&self) -> Decimal {
        expense_total(&self.expenses)
    }
}

/// Sum of `Amount_paid`, unrounded
pub fn expense_total(expenses: &[Expense]) -> Decimal {
    sum_money(expenses.iter().map(|e| e.amount_paid))
}
