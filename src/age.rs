//! age.rs
//!
//! Calendar helpers for moving a date by whole years.
//!
//! Chrono's `with_year` simply fails when the month/day does not exist in the
//! target year (29 February in a non-leap year), so we clamp the day down to
//! the last day of the month instead. Every place that changes the year of a
//! date goes through [`shift_years`] so the clamp is applied the same way:
//!   • resolving a birth date from an age
//!   • offsetting a birth date into the life periods

use chrono::{Datelike, NaiveDate};

/// Moves `date` by `years` (negative goes back), keeping month and day.
///
/// When the day does not exist in the target year the day is clamped down
/// to the last day of that month, so 29 Feb becomes 28 Feb in common years.
/// Saturates at chrono's representable bounds.
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year().saturating_add(years);
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if years < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// Returns number of days in a given year/month (handles leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_shift_keeps_month_and_day() {
        assert_eq!(shift_years(ymd(1995, 1, 1), 5), ymd(2000, 1, 1));
        assert_eq!(shift_years(ymd(2026, 10, 17), -30), ymd(1996, 10, 17));
    }

    #[test]
    fn test_shift_clamps_leap_day() {
        assert_eq!(shift_years(ymd(2000, 2, 29), 5), ymd(2005, 2, 28));
        assert_eq!(shift_years(ymd(2000, 2, 29), 4), ymd(2004, 2, 29));
        assert_eq!(shift_years(ymd(2024, 2, 29), -1), ymd(2023, 2, 28));
        // 1900 is not a leap year
        assert_eq!(shift_years(ymd(2000, 2, 29), -100), ymd(1900, 2, 28));
    }

    #[test]
    fn test_shift_saturates() {
        assert_eq!(shift_years(ymd(2000, 1, 1), i32::MAX), NaiveDate::MAX);
        assert_eq!(shift_years(ymd(2000, 1, 1), i32::MIN), NaiveDate::MIN);
    }
}
