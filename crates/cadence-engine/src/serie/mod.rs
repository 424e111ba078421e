//! Serie data model: template, recurrence pattern, stop condition, and the
//! occurrences they expand into.

mod occurrence;
mod pattern;
mod stop;
mod template;

use chrono::NaiveDate;

use crate::error::EngineResult;

pub use occurrence::Occurrence;
pub use pattern::{PatternKind, RecurrencePattern};
pub use stop::{StopCondition, StopKind};
pub use template::SerieTemplate;

/// A single recurring-event definition.
///
/// Expansion borrows the serie and never modifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Serie {
    pub template: SerieTemplate,
    pub pattern: RecurrencePattern,
    pub stop: StopCondition,
    pub start_date: NaiveDate,
}

impl Serie {
    #[must_use]
    pub const fn new(
        template: SerieTemplate,
        pattern: RecurrencePattern,
        stop: StopCondition,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            template,
            pattern,
            stop,
            start_date,
        }
    }

    /// ## Summary
    /// Validates template, pattern and stop condition.
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidSerie` describing the first invalid field.
    pub fn validate(&self) -> EngineResult<()> {
        self.template.validate()?;
        self.pattern.validate()?;
        self.stop.validate()
    }
}
