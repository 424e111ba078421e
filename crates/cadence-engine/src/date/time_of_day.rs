//! Wall-clock time values in `HH:MM` form.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A 24-hour wall-clock time with minute precision.
///
/// Carries no date and no zone; [`DateCursor::with_time_of_day`] combines it
/// with a calendar date.
///
/// [`DateCursor::with_time_of_day`]: super::DateCursor::with_time_of_day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Last minute of the day, used as the inclusive bound of date stops.
    #[expect(clippy::unwrap_used, reason = "23:59:00 is a valid constant time")]
    pub const END_OF_DAY: Self = Self(NaiveTime::from_hms_opt(23, 59, 0).unwrap());

    /// ## Summary
    /// Builds a time of day from hour and minute.
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidTimeOfDay` if either component is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> EngineResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidTimeOfDay(format!("{hour:02}:{minute:02}")))
    }

    #[must_use]
    pub const fn as_naive(self) -> NaiveTime {
        self.0
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    /// Parses `HH:MM`. Seconds, single-digit hours and 12-hour suffixes are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidTimeOfDay(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2
            || minute.len() != 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
            || !minute.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour = hour.parse::<u32>().map_err(|_err| invalid())?;
        let minute = minute.parse::<u32>().map_err(|_err| invalid())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
