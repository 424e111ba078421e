//! Serie expansion.
//!
//! ## Summary
//! [`expand`] turns a [`Serie`] into its ordered occurrences. Expansion is a
//! pure function of the serie: the same input always yields the same output,
//! and the serie is never modified.

mod runner;
mod scope;
mod strategy;

use chrono::NaiveDateTime;
use serde::Serialize;

use cadence_core::config::{DEFAULT_MAX_CYCLES, EngineConfig};
use cadence_core::error::CoreError;

use crate::error::{EngineError, EngineResult};
use crate::serie::{Occurrence, Serie};

pub use runner::RunState;
pub use scope::Scope;
pub use strategy::{CycleContext, PatternStrategy};

use runner::CycleRunner;

/// Tuning knobs of an expansion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Cycles allowed before the run is declared divergent.
    ///
    /// A cycle is one period of the pattern: a day for daily rules, a week,
    /// a month or a year otherwise. The cap therefore bounds the horizon
    /// times the frequency. The default of 10,000 covers about 27 years of
    /// a daily serie, or 190 years of a weekly one.
    pub max_cycles: u32,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

impl TryFrom<&EngineConfig> for ExpandOptions {
    type Error = EngineError;

    fn try_from(config: &EngineConfig) -> Result<Self, Self::Error> {
        if config.max_cycles == 0 {
            return Err(CoreError::InvalidConfiguration(
                "engine.max_cycles must be at least 1".to_string(),
            )
            .into());
        }
        Ok(Self {
            max_cycles: config.max_cycles,
        })
    }
}

/// Occurrences of a serie together with how the run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expansion {
    occurrences: Vec<Occurrence>,
    state: RunState,
    cycles: u32,
}

impl Expansion {
    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    #[must_use]
    pub fn into_occurrences(self) -> Vec<Occurrence> {
        self.occurrences
    }

    /// Terminal state of the run.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Cycles the runner executed, including empty ones.
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Occurrences intersecting the half-open window `[from, to)`, in order.
    pub fn between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> impl Iterator<Item = &Occurrence> {
        self.occurrences
            .iter()
            .filter(move |occurrence| occurrence.overlaps(from, to))
    }
}

/// ## Summary
/// Expands a serie with default options.
///
/// ## Errors
/// Same as [`expand_with`].
pub fn expand(serie: &Serie) -> EngineResult<Vec<Occurrence>> {
    expand_with(serie, &ExpandOptions::default()).map(Expansion::into_occurrences)
}

/// ## Summary
/// Validates the serie, normalizes its stop condition and runs cycles until
/// a stop rule fires.
///
/// ## Errors
/// - `EngineError::InvalidSerie` if the serie fails validation.
/// - `EngineError::InvalidWeekdayArbitration` if an nth-weekday lookup leaves its month.
/// - `EngineError::RecurrenceDiverged` if `options.max_cycles` is exhausted.
/// - `EngineError::DateOutOfRange` if a date leaves the supported calendar.
#[tracing::instrument(
    skip_all,
    fields(
        pattern = %serie.pattern.kind(),
        stop = %serie.stop.kind(),
        start = %serie.start_date,
    )
)]
pub fn expand_with(serie: &Serie, options: &ExpandOptions) -> EngineResult<Expansion> {
    serie.validate()?;
    let scope = Scope::normalize(&serie.stop, serie.start_date)?;

    tracing::debug!(max_cycles = options.max_cycles, "Expanding serie");

    let outcome = CycleRunner::new(serie, scope, options.max_cycles).run()?;
    Ok(Expansion {
        occurrences: outcome.occurrences,
        state: outcome.state,
        cycles: outcome.cycles,
    })
}
