//! The cycle loop that turns a serie into occurrences.

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

use crate::date::DateCursor;
use crate::error::{EngineError, EngineResult};
use crate::serie::{Occurrence, Serie, StopKind};

use super::scope::Scope;
use super::strategy::{CycleContext, PatternStrategy};

/// Lifecycle of a single expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    Running,
    StoppedByDate,
    StoppedByCount,
    StoppedByProjectionBound,
}

impl RunState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::StoppedByDate => "stoppedByDate",
            Self::StoppedByCount => "stoppedByCount",
            Self::StoppedByProjectionBound => "stoppedByProjectionBound",
        }
    }

    #[must_use]
    pub const fn is_stopped(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a finished run.
#[derive(Debug)]
pub(crate) struct RunOutcome {
    pub occurrences: Vec<Occurrence>,
    pub state: RunState,
    pub cycles: u32,
}

/// ## Summary
/// Drives pattern strategies cycle by cycle until a stop rule fires.
///
/// Each cycle asks the strategy for candidate dates, drops those before the
/// cursor, and accepts the rest one at a time. The stop date (or projection
/// bound) and the instance limit are checked before every accepted
/// occurrence. The cursor then moves to the day after the last accepted
/// occurrence ends. A cycle with no dates advances the cycle counter, and
/// ends a date-bound run when its period already starts after the bound.
pub(crate) struct CycleRunner<'a> {
    serie: &'a Serie,
    scope: Scope,
    max_cycles: u32,
    origin: DateCursor,
    cursor: DateCursor,
    cycle_index: u32,
    accepted: u32,
    state: RunState,
    occurrences: Vec<Occurrence>,
}

impl<'a> CycleRunner<'a> {
    pub fn new(serie: &'a Serie, scope: Scope, max_cycles: u32) -> Self {
        let origin = DateCursor::new(scope.start_date);
        Self {
            serie,
            scope,
            max_cycles,
            origin,
            cursor: origin,
            cycle_index: 0,
            accepted: 0,
            state: RunState::Running,
            occurrences: Vec::new(),
        }
    }

    /// ## Errors
    /// Returns `EngineError::RecurrenceDiverged` when no stop rule fires within
    /// `max_cycles` cycles, or any date error raised by a strategy.
    pub fn run(mut self) -> EngineResult<RunOutcome> {
        if self.scope.instance_limit == Some(0) {
            self.state = RunState::StoppedByCount;
        }

        while self.state == RunState::Running {
            if self.cycle_index >= self.max_cycles {
                tracing::warn!(
                    cycles = self.cycle_index,
                    cursor = %self.cursor,
                    accepted = self.occurrences.len(),
                    "Recurrence diverged"
                );
                return Err(EngineError::RecurrenceDiverged {
                    cycles: self.cycle_index,
                    cursor: self.cursor.date(),
                });
            }
            self.step()?;
        }

        if self.scope.clips_spillover() {
            self.clip_spillover();
        }

        tracing::debug!(
            state = %self.state,
            cycles = self.cycle_index,
            occurrences = self.occurrences.len(),
            "Expansion finished"
        );

        Ok(RunOutcome {
            occurrences: self.occurrences,
            state: self.state,
            cycles: self.cycle_index,
        })
    }

    fn step(&mut self) -> EngineResult<()> {
        let ctx = CycleContext {
            index: self.cycle_index,
            cursor: self.cursor,
            origin: self.origin,
        };
        let mut dates = self.serie.pattern.dates_for_cycle(ctx)?;
        dates.retain(|date| *date >= self.cursor);
        self.cycle_index += 1;

        if dates.is_empty() {
            tracing::trace!(cycle = ctx.index, cursor = %ctx.cursor, "Empty cycle");
            return self.stop_if_period_past_bound(ctx);
        }

        let mut last_end = None;
        for date in dates {
            let occurrence = self.serie.template.occurrence_on(date)?;

            if self
                .scope
                .stop_at
                .is_some_and(|stop_at| occurrence.start_date_time > stop_at)
            {
                self.state = self.date_stop_state();
                break;
            }
            if self.limit_reached() {
                self.state = RunState::StoppedByCount;
                break;
            }

            tracing::trace!(
                cycle = ctx.index,
                start = %occurrence.start_date_time,
                end = %occurrence.end_date_time,
                "Occurrence accepted"
            );
            last_end = Some(occurrence.end_date_time.date());
            self.occurrences.push(occurrence);
            self.accepted += 1;
        }

        if self.state == RunState::Running && self.limit_reached() {
            self.state = RunState::StoppedByCount;
        }
        if let Some(end) = last_end {
            self.cursor = DateCursor::new(end).add_days(1)?;
        }
        Ok(())
    }

    /// Ends a date-bound run once an empty cycle's period begins after the
    /// stop instant. Later cycles only cover later periods.
    fn stop_if_period_past_bound(&mut self, ctx: CycleContext) -> EngineResult<()> {
        let Some(stop_at) = self.scope.stop_at else {
            return Ok(());
        };
        let anchor = self.serie.pattern.period_anchor(ctx)?;
        if anchor.date().and_time(NaiveTime::MIN) > stop_at {
            tracing::debug!(
                cycle = ctx.index,
                period = %anchor,
                %stop_at,
                "Empty cycle past the stop date"
            );
            self.state = self.date_stop_state();
        }
        Ok(())
    }

    fn limit_reached(&self) -> bool {
        self.scope
            .instance_limit
            .is_some_and(|limit| self.accepted >= limit)
    }

    fn date_stop_state(&self) -> RunState {
        match self.scope.origin {
            StopKind::NoStopDate => RunState::StoppedByProjectionBound,
            StopKind::StopWithinDate | StopKind::StopAfterInstances => RunState::StoppedByDate,
        }
    }

    /// Drops occurrences that start in bounds but end after the stop date.
    fn clip_spillover(&mut self) {
        let Some(stop_at) = self.scope.stop_at else {
            return;
        };
        let before = self.occurrences.len();
        self.occurrences
            .retain(|occurrence| occurrence.end_date_time <= stop_at);
        let clipped = before - self.occurrences.len();
        if clipped > 0 {
            tracing::debug!(clipped, %stop_at, "Dropped occurrences ending after the stop date");
        }
    }
}
