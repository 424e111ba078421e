//! Termination rules of a serie.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

/// When expansion ends. Exactly one rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopCondition {
    /// No occurrence may end after `date` at 23:59.
    StopWithinDate { date: NaiveDate },
    /// At most `count` occurrences.
    StopAfterInstances { count: u32 },
    /// No declared end.
    ///
    /// The engine still needs a bound: expansion covers the next
    /// `projection_months` months from the start date and stops there, so
    /// "no stop date" means "bounded by a rolling projection window".
    NoStopDate { projection_months: u32 },
}

impl StopCondition {
    #[must_use]
    pub const fn kind(&self) -> StopKind {
        match self {
            Self::StopWithinDate { .. } => StopKind::StopWithinDate,
            Self::StopAfterInstances { .. } => StopKind::StopAfterInstances,
            Self::NoStopDate { .. } => StopKind::NoStopDate,
        }
    }

    /// ## Summary
    /// Checks the projection window of `NoStopDate`.
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidSerie` for a zero-month projection.
    pub fn validate(&self) -> EngineResult<()> {
        match *self {
            Self::NoStopDate {
                projection_months: 0,
            } => Err(EngineError::InvalidSerie(
                "projectionMonths must be at least 1".to_string(),
            )),
            Self::StopWithinDate { .. }
            | Self::StopAfterInstances { .. }
            | Self::NoStopDate { .. } => Ok(()),
        }
    }
}

/// Tag of a [`StopCondition`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopKind {
    StopWithinDate,
    StopAfterInstances,
    NoStopDate,
}

impl StopKind {
    pub const ALL: [Self; 3] = [
        Self::StopWithinDate,
        Self::StopAfterInstances,
        Self::NoStopDate,
    ];

    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StopWithinDate => "stopWithinDate",
            Self::StopAfterInstances => "stopAfterInstances",
            Self::NoStopDate => "noStopDate",
        }
    }
}

impl FromStr for StopKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownStopConditionKind(s.to_string()))
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
