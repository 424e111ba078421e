//! Recurrence patterns and their tags.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};

use crate::date::{Ordinal, WeekdaySet};
use crate::error::{EngineError, EngineResult};

/// How a serie repeats. Exactly one rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrencePattern {
    /// Every `interval` days.
    DailyEveryNDays { interval: u32 },
    /// Every Monday to Friday.
    DailyEveryWeekday,
    /// The flagged weekdays of every `week_interval`-th week.
    WeeklyStandard {
        week_interval: u32,
        active_weekdays: WeekdaySet,
    },
    /// A fixed day of every `interval`-th month. Months without that day are skipped.
    MonthlyFixedDayEveryNMonths { day_of_month: u32, interval: u32 },
    /// The nth weekday of every `interval`-th month.
    MonthlyNthWeekday {
        ordinal: Ordinal,
        weekday: Weekday,
        interval: u32,
    },
    /// A fixed calendar date every `year_interval` years.
    YearlyFixedDate {
        day_of_month: u32,
        month: u32,
        year_interval: u32,
    },
    /// The nth weekday of a fixed month every `year_interval` years.
    YearlyNthWeekday {
        ordinal: Ordinal,
        weekday: Weekday,
        month: u32,
        year_interval: u32,
    },
}

impl RecurrencePattern {
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        match self {
            Self::DailyEveryNDays { .. } => PatternKind::DailyEveryNDays,
            Self::DailyEveryWeekday => PatternKind::DailyEveryWeekday,
            Self::WeeklyStandard { .. } => PatternKind::WeeklyStandard,
            Self::MonthlyFixedDayEveryNMonths { .. } => PatternKind::MonthlyFixedDayEveryNMonths,
            Self::MonthlyNthWeekday { .. } => PatternKind::MonthlyNthWeekday,
            Self::YearlyFixedDate { .. } => PatternKind::YearlyFixedDate,
            Self::YearlyNthWeekday { .. } => PatternKind::YearlyNthWeekday,
        }
    }

    /// ## Summary
    /// Checks intervals and calendar fields.
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidSerie` naming the first out-of-range field.
    pub fn validate(&self) -> EngineResult<()> {
        match *self {
            Self::DailyEveryNDays { interval }
            | Self::MonthlyNthWeekday { interval, .. } => positive("interval", interval),
            Self::DailyEveryWeekday => Ok(()),
            Self::WeeklyStandard { week_interval, .. } => positive("weekInterval", week_interval),
            Self::MonthlyFixedDayEveryNMonths {
                day_of_month,
                interval,
            } => {
                day_in_range(day_of_month)?;
                positive("interval", interval)
            }
            Self::YearlyFixedDate {
                day_of_month,
                month,
                year_interval,
            } => {
                day_in_range(day_of_month)?;
                month_in_range(month)?;
                // 2000 is a leap year, so this only rejects dates no year has.
                if NaiveDate::from_ymd_opt(2000, month, day_of_month).is_none() {
                    return Err(EngineError::InvalidSerie(format!(
                        "{month:02}-{day_of_month:02} never occurs"
                    )));
                }
                positive("yearInterval", year_interval)
            }
            Self::YearlyNthWeekday {
                month,
                year_interval,
                ..
            } => {
                month_in_range(month)?;
                positive("yearInterval", year_interval)
            }
        }
    }
}

fn positive(field: &str, value: u32) -> EngineResult<()> {
    if value == 0 {
        return Err(EngineError::InvalidSerie(format!(
            "{field} must be at least 1"
        )));
    }
    Ok(())
}

fn day_in_range(day: u32) -> EngineResult<()> {
    if !(1..=31).contains(&day) {
        return Err(EngineError::InvalidSerie(format!(
            "dayOfMonth {day} is outside 1..=31"
        )));
    }
    Ok(())
}

fn month_in_range(month: u32) -> EngineResult<()> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidSerie(format!(
            "month {month} is outside 1..=12"
        )));
    }
    Ok(())
}

/// Tag of a [`RecurrencePattern`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    DailyEveryNDays,
    DailyEveryWeekday,
    WeeklyStandard,
    MonthlyFixedDayEveryNMonths,
    MonthlyNthWeekday,
    YearlyFixedDate,
    YearlyNthWeekday,
}

impl PatternKind {
    pub const ALL: [Self; 7] = [
        Self::DailyEveryNDays,
        Self::DailyEveryWeekday,
        Self::WeeklyStandard,
        Self::MonthlyFixedDayEveryNMonths,
        Self::MonthlyNthWeekday,
        Self::YearlyFixedDate,
        Self::YearlyNthWeekday,
    ];

    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyEveryNDays => "dailyEveryNDays",
            Self::DailyEveryWeekday => "dailyEveryWeekday",
            Self::WeeklyStandard => "weeklyStandard",
            Self::MonthlyFixedDayEveryNMonths => "monthlyFixedDayEveryNMonths",
            Self::MonthlyNthWeekday => "monthlyNthWeekday",
            Self::YearlyFixedDate => "yearlyFixedDate",
            Self::YearlyNthWeekday => "yearlyNthWeekday",
        }
    }
}

impl FromStr for PatternKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownPatternKind(s.to_string()))
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
