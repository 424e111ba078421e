//! Immutable calendar date arithmetic.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};

use super::TimeOfDay;
use crate::error::{EngineError, EngineResult};

/// A calendar date that only ever moves by producing a new value.
///
/// Every strategy and every cycle receives its own copy; nothing holds a
/// reference to a cursor another component may advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateCursor(NaiveDate);

impl DateCursor {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// ## Summary
    /// Builds a cursor from year, month and day.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` if the triple is not a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| EngineError::DateOutOfRange(format!("{year:04}-{month:02}-{day:02}")))
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// ## Summary
    /// Moves `n` days forward (or backward for negative `n`).
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` past the supported calendar range.
    pub fn add_days(self, n: i64) -> EngineResult<Self> {
        let shifted = if n >= 0 {
            self.0.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        shifted
            .map(Self)
            .ok_or_else(|| self.overflow(format_args!("{n:+} days")))
    }

    /// ## Summary
    /// Moves `n` months, clamping the day to the end of a shorter target month.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` past the supported calendar range.
    pub fn add_months(self, n: i32) -> EngineResult<Self> {
        let shifted = if n >= 0 {
            self.0.checked_add_months(Months::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(n.unsigned_abs()))
        };
        shifted
            .map(Self)
            .ok_or_else(|| self.overflow(format_args!("{n:+} months")))
    }

    /// ## Summary
    /// Moves `n` years; 29 February clamps to 28 February in common years.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` past the supported calendar range.
    pub fn add_years(self, n: i32) -> EngineResult<Self> {
        n.checked_mul(12)
            .ok_or_else(|| self.overflow(format_args!("{n:+} years")))
            .and_then(|months| self.add_months(months))
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// First day of the cursor's month.
    #[must_use]
    pub fn first_of_month(self) -> Self {
        // Day 1 exists in every month.
        Self(self.0 - Days::new(u64::from(self.0.day0())))
    }

    /// Monday of the cursor's ISO week.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` at the lower end of the calendar range.
    pub fn monday_of_week(self) -> EngineResult<Self> {
        self.add_days(-i64::from(self.weekday().num_days_from_monday()))
    }

    /// Same year and month with a different day, or `None` if the month is too short.
    #[must_use]
    pub fn with_day(self, day: u32) -> Option<Self> {
        self.0.with_day(day).map(Self)
    }

    /// Combines the date with a wall-clock time.
    #[must_use]
    pub fn with_time_of_day(self, time: TimeOfDay) -> NaiveDateTime {
        self.0.and_time(time.as_naive())
    }

    fn overflow(self, step: fmt::Arguments<'_>) -> EngineError {
        EngineError::DateOutOfRange(format!("{} {step}", self.0))
    }
}

impl From<NaiveDate> for DateCursor {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateCursor> for NaiveDate {
    fn from(cursor: DateCursor) -> Self {
        cursor.0
    }
}

impl fmt::Display for DateCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(y: i32, m: u32, d: u32) -> DateCursor {
        DateCursor::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_add_days_returns_new_value() {
        let start = cursor(2024, 2, 28);
        let next = start.add_days(2).unwrap();

        assert_eq!(next, cursor(2024, 3, 1));
        assert_eq!(start, cursor(2024, 2, 28));
    }

    #[test]
    fn test_add_negative_days() {
        assert_eq!(cursor(2024, 3, 1).add_days(-1).unwrap(), cursor(2024, 2, 29));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(cursor(2024, 1, 31).add_months(1).unwrap(), cursor(2024, 2, 29));
        assert_eq!(cursor(2023, 1, 31).add_months(1).unwrap(), cursor(2023, 2, 28));
        assert_eq!(cursor(2024, 3, 31).add_months(-1).unwrap(), cursor(2024, 2, 29));
    }

    #[test]
    fn test_add_years_handles_leap_day() {
        assert_eq!(cursor(2024, 2, 29).add_years(1).unwrap(), cursor(2025, 2, 28));
        assert_eq!(cursor(2024, 2, 29).add_years(4).unwrap(), cursor(2028, 2, 29));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let last = DateCursor::new(NaiveDate::MAX);
        let err = last.add_days(1).unwrap_err();
        assert!(matches!(err, EngineError::DateOutOfRange(_)));
        assert!(last.add_years(i32::MAX).is_err());
    }

    #[test]
    fn test_weekday_queries() {
        let monday = cursor(2024, 1, 1);
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(cursor(2024, 1, 7).monday_of_week().unwrap(), monday);
        assert_eq!(monday.monday_of_week().unwrap(), monday);
    }

    #[test]
    fn test_first_of_month_and_with_day() {
        let date = cursor(2024, 4, 17);
        assert_eq!(date.first_of_month(), cursor(2024, 4, 1));
        assert_eq!(date.with_day(30), Some(cursor(2024, 4, 30)));
        assert_eq!(date.with_day(31), None);
    }

    #[test]
    fn test_with_time_of_day() {
        let at = cursor(2024, 1, 1).with_time_of_day("09:15".parse().unwrap());
        assert_eq!(at.to_string(), "2024-01-01 09:15:00");
    }

    #[test]
    fn test_from_ymd_rejects_invalid_dates() {
        assert!(DateCursor::from_ymd(2023, 2, 29).is_err());
        assert!(DateCursor::from_ymd(2024, 13, 1).is_err());
    }
}
