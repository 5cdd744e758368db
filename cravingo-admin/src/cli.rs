//! Command line filter selection
//!
//! ```text
//! cravingo-admin [today|custom|all] [STATUS|all] [--from YYYY-MM-DD] [--to YYYY-MM-DD]
//! ```
//!
//! Defaults to `today delivered`. `--from`/`--to` imply `custom`.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use shared::error::{AppError, AppResult};
use shared::models::{CustomRange, DateFilterKind, FilterState, StatusFilter};

use crate::utils::time::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateArg {
    Today,
    Custom,
    All,
}

impl From<DateArg> for DateFilterKind {
    fn from(arg: DateArg) -> Self {
        match arg {
            DateArg::Today => Self::Today,
            DateArg::Custom => Self::Custom,
            DateArg::All => Self::All,
        }
    }
}

/// Print dashboard metrics for one filter selection
#[derive(Debug, Parser)]
#[command(name = "cravingo-admin", author, version, about)]
pub struct Cli {
    /// Date window; defaults to `today`, or `custom` when a range is given
    #[arg(value_enum)]
    pub date: Option<DateArg>,

    /// Order status to match, or `all`
    #[arg(default_value = "delivered")]
    pub status: StatusFilter,

    /// First day of a custom range
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day of a custom range, inclusive
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

impl Cli {
    pub fn into_filter(self) -> AppResult<FilterState> {
        let has_range = self.from.is_some() || self.to.is_some();
        let date_filter = match self.date {
            Some(date) if has_range && date != DateArg::Custom => {
                return Err(AppError::invalid_request(
                    "--from/--to can only be used with the custom date filter",
                ));
            }
            Some(date) => date.into(),
            None if has_range => DateFilterKind::Custom,
            None => DateFilterKind::Today,
        };

        Ok(FilterState {
            date_filter,
            custom_range: CustomRange {
                start: self.from,
                end: self.to,
            },
            status_filter: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shared::models::OrderStatus;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cravingo-admin").chain(args.iter().copied()))
    }

    fn filter(args: &[&str]) -> FilterState {
        parse(args).unwrap().into_filter().unwrap()
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_default() {
        assert_eq!(filter(&[]), FilterState::default());
    }

    #[test]
    fn test_positional() {
        let f = filter(&["all", "delivered"]);
        assert_eq!(f.date_filter, DateFilterKind::All);
        assert_eq!(f.status_filter, StatusFilter::Status(OrderStatus::Delivered));

        let f = filter(&["today", "all"]);
        assert_eq!(f.status_filter, StatusFilter::All);

        let f = filter(&["all", "preparing"]);
        assert_eq!(
            f.status_filter,
            StatusFilter::Status(OrderStatus::Other("preparing".into()))
        );
    }

    #[test]
    fn test_range_flags_imply_custom() {
        let f = filter(&["--from", "2026-10-01"]);
        assert_eq!(f.date_filter, DateFilterKind::Custom);
        assert_eq!(f.custom_range.start, NaiveDate::from_ymd_opt(2026, 10, 1));
        assert!(f.custom_range.end.is_none());
        assert_eq!(f.status_filter, StatusFilter::Status(OrderStatus::Delivered));

        let f = filter(&["custom", "cancelled", "--to", "2026-10-05"]);
        assert_eq!(f.custom_range.end, NaiveDate::from_ymd_opt(2026, 10, 5));
        assert_eq!(f.status_filter, StatusFilter::Status(OrderStatus::Cancelled));
    }

    #[test]
    fn test_range_with_other_date_filter_is_rejected() {
        let cli = parse(&["all", "--from", "2026-10-01"]).unwrap();
        assert!(cli.into_filter().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--to"]).is_err());
        assert!(parse(&["--from", "yesterday"]).is_err());
        assert!(parse(&["weekly"]).is_err());
        assert!(parse(&["all", "delivered", "extra"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
