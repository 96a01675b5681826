// Gregorian calendar arithmetic: leap years, month lengths, month grids

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::moment::Moment;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Proleptic Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (0-based) of `year`.
///
/// Months outside 0..12 wrap, so callers that carry a month index across a
/// year boundary get the length of the month they actually land in.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = (month % 12) as usize;
    if month == 1 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month]
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based ordinal day of the year
pub fn day_of_year(moment: Moment) -> u32 {
    moment.date().ordinal()
}

/// ISO-8601 week number of the Moment's date
pub fn iso_week(moment: Moment) -> u32 {
    moment.date().iso_week().week()
}

/// Whole days from the date of `from` to the date of `to`; negative when
/// `to` lies in the past. Time of day is ignored.
pub fn day_distance(from: Moment, to: Moment) -> i64 {
    (to.date() - from.date()).num_days()
}

/// Step a (year, 0-based month) pair by `delta` months.
pub fn step_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year as i64 * 12 + month as i64 + delta as i64;
    (total.div_euclid(12) as i32, total.rem_euclid(12) as u32)
}

/// One row of a Monday-first month grid. `days[i]` is the day of month
/// shown in weekday column `i` (Monday = 0), `None` for padding cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub week: u32,
    pub days: [Option<u32>; 7],
}

/// Monday-first layout of one month, as shown by the calendar screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st (0 when the month starts on a Monday)
    pub leading_blanks: u32,
    pub days: u32,
    pub rows: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Self {
        let month = month % 12;
        let days = days_in_month(year, month);
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1);
        let leading_blanks = first
            .map(|d| d.weekday().num_days_from_monday())
            .unwrap_or(0);

        let mut rows = Vec::new();
        let mut day = 1u32;
        let mut column = leading_blanks;
        while day <= days {
            let mut cells = [None; 7];
            let row_first = day;
            while column < 7 && day <= days {
                cells[column as usize] = Some(day);
                day += 1;
                column += 1;
            }
            let week = NaiveDate::from_ymd_opt(year, month + 1, row_first)
                .map(|d| d.iso_week().week())
                .unwrap_or(0);
            rows.push(WeekRow { week, days: cells });
            column = 0;
        }

        Self {
            year,
            month,
            leading_blanks,
            days,
            rows,
        }
    }

    pub fn contains(&self, moment: Moment) -> bool {
        moment.year() == self.year && moment.month() == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year_examples() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(-4));
        assert!(is_leap_year(0));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2023, 3), 30);
        assert_eq!(days_in_month(2023, 11), 31);
        assert_eq!(days_in_month(2023, 13), 28);
    }

    #[test]
    fn test_days_in_month_matches_chrono() {
        for year in [1600, 1700, 1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let first = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
                let (ny, nm) = step_month(year, month, 1);
                let next = NaiveDate::from_ymd_opt(ny, nm + 1, 1).unwrap();
                assert_eq!(days_in_month(year, month) as i64, (next - first).num_days());
            }
        }
    }

    #[test]
    fn test_day_of_year() {
        let m = Moment::new(2024, 11, 31, 12, 0, 0).unwrap();
        assert_eq!(day_of_year(m), 366);
        let m = Moment::new(2023, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(day_of_year(m), 60);
        assert_eq!(days_in_year(2023), 365);
    }

    #[test]
    fn test_step_month_wraps_years() {
        assert_eq!(step_month(2024, 0, -1), (2023, 11));
        assert_eq!(step_month(2024, 11, 1), (2025, 0));
        assert_eq!(step_month(2024, 5, -18), (2022, 11));
    }

    #[test]
    fn test_day_distance_ignores_time() {
        let a = Moment::new(2024, 0, 1, 23, 59, 0).unwrap();
        let b = Moment::new(2024, 0, 2, 0, 1, 0).unwrap();
        assert_eq!(day_distance(a, b), 1);
        assert_eq!(day_distance(b, a), -1);
        assert_eq!(day_distance(a, a), 0);
    }

    #[test]
    fn test_month_grid_monday_first() {
        // September 2024 starts on a Sunday
        let grid = MonthGrid::new(2024, 8);
        assert_eq!(grid.leading_blanks, 6);
        assert_eq!(grid.days, 30);
        assert_eq!(grid.rows[0].days[6], Some(1));
        assert_eq!(grid.rows[0].week, 35);
        assert_eq!(grid.rows.len(), 6);
        assert_eq!(grid.rows[5].days[0], Some(30));
        assert_eq!(grid.rows[5].days[1], None);
    }

    #[test]
    fn test_month_grid_covers_every_day_once() {
        let grid = MonthGrid::new(2024, 1);
        let mut seen: Vec<u32> = grid
            .rows
            .iter()
            .flat_map(|r| r.days.iter().flatten().copied())
            .collect();
        seen.sort();
        assert_eq!(seen, (1..=29).collect::<Vec<_>>());
    }
}
