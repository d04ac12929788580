use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A single dataset period: one calendar month.
///
/// Ordered chronologically and displayed as the `YYYYMM` token used in the
/// upstream archive filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        assert!(month >= 1 && month <= 12, "month out of range");
        YearMonth { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The token form, e.g. `202403`.
    pub fn token(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// The following calendar month, rolling December into January.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            YearMonth::new(self.year + 1, 1)
        } else {
            YearMonth::new(self.year, self.month + 1)
        }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Lazy iterator over every month from `start` through `end` inclusive.
///
/// Day-of-month is irrelevant; both bounds are taken at month granularity.
/// An empty range (start after end) yields nothing.
#[derive(Debug, Clone)]
pub struct MonthRange {
    current: YearMonth,
    end: YearMonth,
}

impl MonthRange {
    pub fn new(start: YearMonth, end: YearMonth) -> Self {
        MonthRange {
            current: start,
            end,
        }
    }
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<YearMonth> {
        if self.current > self.end {
            return None;
        }
        let item = self.current;
        self.current = item.next();
        Some(item)
    }
}

/// The most recently completed month relative to `today`.
///
/// Computed as the month of the day before the first of `today`'s month, so
/// it behaves correctly in January as well.
pub fn most_recent_month(today: NaiveDate) -> YearMonth {
    let first_of_month = today.with_day(1).expect("day 1 is valid for every month");
    let last_of_previous = first_of_month.pred_opt().expect("date not at calendar minimum");
    YearMonth::from(last_of_previous)
}
