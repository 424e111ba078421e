//! Normalized expansion bounds.

use chrono::{NaiveDate, NaiveDateTime};

use crate::date::{DateCursor, TimeOfDay};
use crate::error::{EngineError, EngineResult};
use crate::serie::{StopCondition, StopKind};

/// The window an expansion runs in, derived once from the stop condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub start_date: NaiveDate,
    /// Latest accepted occurrence start. `None` for count-bound series.
    pub stop_at: Option<NaiveDateTime>,
    /// Maximum number of occurrences. `None` for date-bound series.
    pub instance_limit: Option<u32>,
    pub origin: StopKind,
}

impl Scope {
    /// ## Summary
    /// Resolves a stop condition against the serie's start date.
    ///
    /// A stop date becomes that date at 23:59. A projection window becomes the
    /// date `projection_months` after the start, also at 23:59.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` if the projection end overflows.
    pub fn normalize(stop: &StopCondition, start_date: NaiveDate) -> EngineResult<Self> {
        let (stop_at, instance_limit) = match *stop {
            StopCondition::StopWithinDate { date } => (Some(end_of(DateCursor::new(date))), None),
            StopCondition::StopAfterInstances { count } => (None, Some(count)),
            StopCondition::NoStopDate { projection_months } => {
                let months = i32::try_from(projection_months).map_err(|_err| {
                    EngineError::DateOutOfRange(format!(
                        "projection of {projection_months} months"
                    ))
                })?;
                let bound = DateCursor::new(start_date).add_months(months)?;
                (Some(end_of(bound)), None)
            }
        };

        let scope = Self {
            start_date,
            stop_at,
            instance_limit,
            origin: stop.kind(),
        };
        tracing::trace!(?scope, "Expansion scope normalized");
        Ok(scope)
    }

    /// Whether occurrences ending after `stop_at` are dropped once expansion ends.
    #[must_use]
    pub fn clips_spillover(&self) -> bool {
        self.origin == StopKind::StopWithinDate
    }
}

fn end_of(date: DateCursor) -> NaiveDateTime {
    date.with_time_of_day(TimeOfDay::END_OF_DAY)
}
