//! Date helpers for the rendering layer.
//!
//! Currency formatting lives in [`crate::money::format_currency`]; these
//! cover the dates printed on the document.

use chrono::{Duration, NaiveDate};

/// Formats a date the way the document template prints it: "January 5, 2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Adds (or with a negative count, subtracts) whole days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "January 5, 2026");

        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert_eq!(format_date(date), "December 25, 2026");
    }

    #[test]
    fn test_add_days() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        // Crosses the month boundary
        assert_eq!(
            add_days(date, 14),
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()
        );
        assert_eq!(
            add_days(date, -20),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }
}
