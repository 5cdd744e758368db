//! Filter selection to order query bounds

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{DateFilterKind, FilterState, OrderStatus};

use crate::utils::time::{day_end, day_start, to_iso_millis};

/// Inclusive `$createdAt` bounds and status predicate for one refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBounds {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
}

impl QueryBounds {
    /// Translate a filter selection
    ///
    /// `today` is the current calendar date in `tz`. A custom range with a
    /// missing endpoint is unbounded on that side only.
    pub fn resolve(filter: &FilterState, today: NaiveDate, tz: Tz) -> Self {
        let (start, end) = match filter.date_filter {
            DateFilterKind::Today => (Some(day_start(today, tz)), Some(day_end(today, tz))),
            DateFilterKind::Custom => (
                filter.custom_range.start.map(|d| day_start(d, tz)),
                filter.custom_range.end.map(|d| day_end(d, tz)),
            ),
            DateFilterKind::All => (None, None),
        };
        Self {
            start,
            end,
            status: filter.status_filter.status().cloned(),
        }
    }

    pub fn start_iso(&self) -> Option<String> {
        self.start.map(to_iso_millis)
    }

    pub fn end_iso(&self) -> Option<String> {
        self.end.map(to_iso_millis)
    }
}
