//! Resolution of "nth weekday of the month" requests.
//!
//! ## Summary
//! Ordinals `First` through `Fourth` always exist, because every month has at
//! least 28 days and so at least four of each weekday. `Last` picks the fifth
//! occurrence when the month has one and the fourth otherwise. Requests that
//! would land outside the month are rejected, never clamped.

use std::fmt;

use chrono::Weekday;

use super::DateCursor;
use crate::error::{EngineError, EngineResult};

/// The "1st/2nd/3rd/4th/last" selector of nth-weekday patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    /// ## Summary
    /// Converts the wire index (`1..=4`, `5` meaning last).
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidWeekdayArbitration` for any other index.
    pub fn from_index(index: u8) -> EngineResult<Self> {
        match index {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            5 => Ok(Self::Last),
            other => Err(EngineError::InvalidWeekdayArbitration(format!(
                "ordinal {other} is outside 1..=5 (5 = last)"
            ))),
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Last => 5,
        }
    }

    /// Whole weeks between the first matching weekday and the requested one.
    const fn week_offset(self) -> i64 {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
            Self::Fourth | Self::Last => 3,
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Last => "last",
        })
    }
}

/// ## Summary
/// Finds the `ordinal` occurrence of `weekday` in the month containing `month`.
///
/// ## Errors
/// Returns `EngineError::InvalidWeekdayArbitration` if the resolved date falls
/// outside the target month, and `EngineError::DateOutOfRange` at the edges of
/// the supported calendar.
pub fn find(month: DateCursor, ordinal: Ordinal, weekday: Weekday) -> EngineResult<DateCursor> {
    let first_of_month = month.first_of_month();
    let lead = (7 + i64::from(weekday.num_days_from_monday())
        - i64::from(first_of_month.weekday().num_days_from_monday()))
        % 7;
    let first_match = first_of_month.add_days(lead)?;

    let resolved = match ordinal {
        Ordinal::Last => {
            let fifth = first_match.add_days(28)?;
            if fifth.month() == first_of_month.month() {
                fifth
            } else {
                fifth.add_days(-7)?
            }
        }
        _ => first_match.add_days(7 * ordinal.week_offset())?,
    };

    if resolved.month() != first_of_month.month() || resolved.year() != first_of_month.year() {
        return Err(EngineError::InvalidWeekdayArbitration(format!(
            "{ordinal} {weekday} of {:04}-{:02} resolves to {resolved}",
            first_of_month.year(),
            first_of_month.month()
        )));
    }

    tracing::trace!(
        %ordinal,
        %weekday,
        resolved = %resolved,
        "Resolved nth weekday"
    );
    Ok(resolved)
}
