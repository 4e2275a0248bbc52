//! Entry of the day.
//!
//! The pick depends only on the calendar date and the catalog length, so
//! every client showing the same catalog highlights the same entry on a
//! given day without storing anything.

use chrono::{Datelike, NaiveDate};

/// `YYYYMMDD` as an integer, e.g. 2024-03-09 -> 20240309.
pub fn daily_seed(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

/// Index of the entry of the day in a catalog of `len` entries, or `None`
/// for an empty catalog.
pub fn zone_of_the_day_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(daily_seed(date).rem_euclid(len as i64) as usize)
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seed_is_yyyymmdd() {
        assert_eq!(daily_seed(date(2024, 3, 9)), 20240309);
        assert_eq!(daily_seed(date(1999, 12, 31)), 19991231);
    }

    #[test]
    fn test_index_is_seed_mod_len() {
        assert_eq!(zone_of_the_day_index(date(2024, 3, 9), 7), Some(20240309 % 7));
        assert_eq!(zone_of_the_day_index(date(2024, 3, 9), 1), Some(0));
        assert_eq!(zone_of_the_day_index(date(2024, 3, 9), 0), None);
    }

    #[test]
    fn test_same_day_same_length_same_pick() {
        for len in 1..50 {
            let a = zone_of_the_day_index(date(2025, 6, 1), len);
            let b = zone_of_the_day_index(date(2025, 6, 1), len);
            assert_eq!(a, b);
            assert!(a.unwrap() < len);
        }
    }

    #[test]
    fn test_consecutive_days_move_the_pick() {
        let a = zone_of_the_day_index(date(2025, 6, 1), 100).unwrap();
        let b = zone_of_the_day_index(date(2025, 6, 2), 100).unwrap();
        assert_eq!((a + 1) % 100, b);
    }
}
