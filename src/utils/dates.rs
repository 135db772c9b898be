//! Calendar-month arithmetic for due-date advancement

use chrono::{Months, NaiveDate};

use crate::types::{LedgerError, LedgerResult};

/// Advance a date by whole calendar months with end-of-month clamping
///
/// Follows standard date-offset semantics rather than fixed 30-day jumps:
/// 2024-01-31 plus one month is 2024-02-29, 2023-01-31 plus one month is
/// 2023-02-28. Fails only when the result would leave chrono's supported
/// date range.
pub fn add_calendar_months(date: NaiveDate, months: u32) -> LedgerResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "Date {} plus {} months is out of range",
                date, months
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn advances_plain_dates() {
        assert_eq!(
            add_calendar_months(date(2024, 1, 1), 1).unwrap(),
            date(2024, 2, 1)
        );
        assert_eq!(
            add_calendar_months(date(2024, 1, 15), 3).unwrap(),
            date(2024, 4, 15)
        );
    }

    #[test]
    fn clamps_to_leap_february() {
        assert_eq!(
            add_calendar_months(date(2024, 1, 31), 1).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn clamps_to_common_february() {
        assert_eq!(
            add_calendar_months(date(2023, 1, 31), 1).unwrap(),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn clamps_thirty_one_to_thirty() {
        assert_eq!(
            add_calendar_months(date(2024, 3, 31), 1).unwrap(),
            date(2024, 4, 30)
        );
    }

    #[test]
    fn crosses_year_boundary() {
        assert_eq!(
            add_calendar_months(date(2024, 11, 30), 3).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn zero_months_is_identity() {
        assert_eq!(
            add_calendar_months(date(2024, 5, 20), 0).unwrap(),
            date(2024, 5, 20)
        );
    }
}
