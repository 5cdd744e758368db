//! Dashboard filter selection

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::OrderStatus;
use crate::error::AppError;

/// Which dates the dashboard covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilterKind {
    #[default]
    Today,
    Custom,
    All,
}

impl DateFilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Custom => "custom",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DateFilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFilterKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "custom" => Ok(Self::Custom),
            "all" => Ok(Self::All),
            other => Err(AppError::invalid_request(format!(
                "Unknown date filter '{}', expected today, custom or all",
                other
            ))),
        }
    }
}

/// Status restriction; `All` applies no predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    All,
    Status(OrderStatus),
}

impl StatusFilter {
    pub fn status(&self) -> Option<&OrderStatus> {
        match self {
            Self::All => None,
            Self::Status(s) => Some(s),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Status(OrderStatus::Delivered))
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "All Statuses".to_string(),
            Self::Status(s) => s.label(),
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::Status(OrderStatus::Delivered)
    }
}

impl From<String> for StatusFilter {
    fn from(s: String) -> Self {
        if s == "all" {
            Self::All
        } else {
            Self::Status(OrderStatus::from(s))
        }
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => "all".to_string(),
            StatusFilter::Status(s) => s.into(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_request("Status filter must not be empty"));
        }
        Ok(Self::from(trimmed.to_string()))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Status(s) => f.write_str(s.as_str()),
        }
    }
}

/// Calendar dates picked for a custom range; either end may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Current dashboard filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub date_filter: DateFilterKind,
    #[serde(default)]
    pub custom_range: CustomRange,
    pub status_filter: StatusFilter,
}

impl FilterState {
    pub fn new(date_filter: DateFilterKind, status_filter: StatusFilter) -> Self {
        Self {
            date_filter,
            custom_range: CustomRange::default(),
            status_filter,
        }
    }

    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>, status_filter: StatusFilter) -> Self {
        Self {
            date_filter: DateFilterKind::Custom,
            custom_range: CustomRange { start, end },
            status_filter,
        }
    }

    /// Expenses are deducted from profit only for all-time delivered orders
    pub fn deducts_expenses(&self) -> bool {
        deducts_expenses(self.date_filter, &self.status_filter)
    }

    /// Human-readable label, e.g. `Status: Delivered, Dates: Today`
    pub fn describe(&self) -> String {
        let dates = match self.date_filter {
            DateFilterKind::Today => "Today".to_string(),
            DateFilterKind::All => "All Time".to_string(),
            DateFilterKind::Custom => match (self.custom_range.start, self.custom_range.end) {
                (Some(start), Some(end)) => format!("{} to {}", start, end),
                _ => "Custom Range".to_string(),
            },
        };
        format!("Status: {}, Dates: {}", self.status_filter.label(), dates)
    }
}

pub fn deducts_expenses(date_filter: DateFilterKind, status_filter: &StatusFilter) -> bool {
    date_filter == DateFilterKind::All && status_filter.is_delivered()
}
