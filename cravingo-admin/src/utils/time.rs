//! Business-timezone day boundaries
//!
//! Calendar dates are interpreted in the business timezone and
//! converted to UTC instants; the backend compares `$createdAt` as UTC ISO
//! strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use shared::error::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Current calendar date in the business timezone
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Longest DST gap to step over, in minutes
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Local wall-clock time to a UTC instant
///
/// An ambiguous time takes its earliest instant. A time inside a DST gap
/// resolves to the first valid instant after the gap.
fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    (0..=MAX_GAP_MINUTES)
        .find_map(|minutes| {
            (naive + chrono::Duration::minutes(minutes))
                .and_local_timezone(tz)
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// 00:00:00.000 of `date` in `tz`
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

/// 23:59:59.999 of `date` in `tz`, an inclusive upper bound
pub fn day_end(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start(next_day, tz) - chrono::Duration::milliseconds(1)
}

/// `2026-10-14T00:00:00.000Z`
pub fn to_iso_millis(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bounds_in_kolkata() {
        let tz = chrono_tz::Asia::Kolkata;
        let d = date(2026, 10, 14);
        // IST is UTC+05:30
        assert_eq!(to_iso_millis(day_start(d, tz)), "2026-10-13T18:30:00.000Z");
        assert_eq!(to_iso_millis(day_end(d, tz)), "2026-10-14T18:29:59.999Z");
    }

    #[test]
    fn test_day_bounds_in_utc() {
        let d = date(2026, 2, 28);
        assert_eq!(to_iso_millis(day_start(d, chrono_tz::UTC)), "2026-02-28T00:00:00.000Z");
        assert_eq!(to_iso_millis(day_end(d, chrono_tz::UTC)), "2026-02-28T23:59:59.999Z");
    }

    #[test]
    fn test_day_end_across_dst() {
        // Madrid springs forward on 2026-03-29, the day has 23 hours
        let tz = chrono_tz::Europe::Madrid;
        let d = date(2026, 3, 29);
        assert_eq!(to_iso_millis(day_start(d, tz)), "2026-03-28T23:00:00.000Z");
        assert_eq!(to_iso_millis(day_end(d, tz)), "2026-03-29T21:59:59.999Z");
    }

    #[test]
    fn test_midnight_in_dst_gap_starts_after_gap() {
        // Beirut skips 00:00-01:00 on 2026-03-29; the day starts at 01:00 EEST
        let tz = chrono_tz::Asia::Beirut;
        let d = date(2026, 3, 29);
        assert_eq!(to_iso_millis(day_start(d, tz)), "2026-03-28T22:00:00.000Z");
        assert_eq!(to_iso_millis(day_end(date(2026, 3, 28), tz)), "2026-03-28T21:59:59.999Z");
    }

    #[test]
    fn test_today_depends_on_timezone() {
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 20, 0, 0).unwrap();
        assert_eq!(today_in(chrono_tz::UTC, now), date(2026, 10, 14));
        assert_eq!(today_in(chrono_tz::Asia::Kolkata, now), date(2026, 10, 15));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-10-01").unwrap(), date(2026, 10, 1));
        assert!(parse_date("01/10/2026").is_err());
    }
}
