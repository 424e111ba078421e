//! Per-cycle date generation for each recurrence pattern.
//!
//! ## Summary
//! A strategy answers one question: which dates does cycle `k` propose? It
//! never advances shared state. The daily strategies work from the cursor the
//! runner hands them; the weekly, monthly and yearly strategies locate period
//! `k` relative to the serie's first period, so a drifting cursor cannot shift
//! or skip a period. An empty answer means "nothing this cycle".

use chrono::NaiveDate;

use crate::date::{DateCursor, Ordinal, WeekdaySet, arbitrator, weekday};
use crate::error::{EngineError, EngineResult};
use crate::serie::RecurrencePattern;

/// Inputs of a single cycle. Passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleContext {
    /// Zero-based cycle number.
    pub index: u32,
    /// Earliest date the runner will accept in this cycle.
    pub cursor: DateCursor,
    /// The serie's start date.
    pub origin: DateCursor,
}

/// Date generation seam implemented by every recurrence rule.
pub trait PatternStrategy {
    /// ## Summary
    /// Returns the candidate dates of one cycle in ascending order.
    ///
    /// ## Errors
    /// Returns an error when a date cannot be represented or a weekday
    /// arbitration falls outside its month. Missing days of month are not
    /// errors; they produce an empty list.
    fn dates_for_cycle(&self, ctx: CycleContext) -> EngineResult<Vec<DateCursor>>;

    /// ## Summary
    /// Returns the first day of the period cycle `ctx.index` covers: the
    /// Monday of its week, the 1st of its month or January 1st of its year.
    /// Daily rules answer with the cursor.
    ///
    /// No candidate of the cycle lies before this date.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` if the period cannot be represented.
    fn period_anchor(&self, ctx: CycleContext) -> EngineResult<DateCursor>;
}

impl PatternStrategy for RecurrencePattern {
    fn dates_for_cycle(&self, ctx: CycleContext) -> EngineResult<Vec<DateCursor>> {
        match *self {
            Self::DailyEveryNDays { interval } => every_n_days(interval, ctx),
            Self::DailyEveryWeekday => every_weekday(ctx),
            Self::WeeklyStandard {
                week_interval,
                active_weekdays,
            } => weekly(week_interval, active_weekdays, ctx),
            Self::MonthlyFixedDayEveryNMonths {
                day_of_month,
                interval,
            } => monthly_fixed_day(day_of_month, interval, ctx),
            Self::MonthlyNthWeekday {
                ordinal,
                weekday,
                interval,
            } => monthly_nth_weekday(ordinal, weekday, interval, ctx),
            Self::YearlyFixedDate {
                day_of_month,
                month,
                year_interval,
            } => yearly_fixed_date(day_of_month, month, year_interval, ctx),
            Self::YearlyNthWeekday {
                ordinal,
                weekday,
                month,
                year_interval,
            } => yearly_nth_weekday(ordinal, weekday, month, year_interval, ctx),
        }
    }

    fn period_anchor(&self, ctx: CycleContext) -> EngineResult<DateCursor> {
        match *self {
            Self::DailyEveryNDays { .. } | Self::DailyEveryWeekday => Ok(ctx.cursor),
            Self::WeeklyStandard { week_interval, .. } => nth_week(ctx, week_interval),
            Self::MonthlyFixedDayEveryNMonths { interval, .. }
            | Self::MonthlyNthWeekday { interval, .. } => nth_month(ctx, interval),
            Self::YearlyFixedDate { year_interval, .. }
            | Self::YearlyNthWeekday { year_interval, .. } => {
                DateCursor::from_ymd(nth_year(ctx, year_interval)?, 1, 1)
            }
        }
    }
}

fn every_n_days(interval: u32, ctx: CycleContext) -> EngineResult<Vec<DateCursor>> {
    if ctx.index == 0 {
        return Ok(vec![ctx.cursor]);
    }
    // The runner has already stepped one day past the previous occurrence.
    let date = ctx.cursor.add_days(i64::from(interval) - 1)?;
    Ok(vec![date])
}

fn every_weekday(ctx: CycleContext) -> EngineResult<Vec<DateCursor>> {
    let mut date = ctx.cursor;
    while weekday::is_weekend(date.weekday()) {
        date = date.add_days(1)?;
    }
    Ok(vec![date])
}

fn weekly(
    week_interval: u32,
    active_weekdays: WeekdaySet,
    ctx: CycleContext,
) -> EngineResult<Vec<DateCursor>> {
    let monday = nth_week(ctx, week_interval)?;
    active_weekdays
        .iter()
        .map(|day| monday.add_days(i64::from(day.num_days_from_monday())))
        .collect()
}

fn monthly_fixed_day(day_of_month: u32, interval: u32, ctx: CycleContext) -> EngineResult<Vec<DateCursor>> {
    let month = nth_month(ctx, interval)?;
    match month.with_day(day_of_month) {
        Some(date) => Ok(vec![date]),
        None => {
            tracing::debug!(
                cycle = ctx.index,
                day_of_month,
                month = %month,
                "Day of month does not exist, skipping cycle"
            );
            Ok(Vec::new())
        }
    }
}

fn monthly_nth_weekday(
    ordinal: Ordinal,
    weekday: chrono::Weekday,
    interval: u32,
    ctx: CycleContext,
) -> EngineResult<Vec<DateCursor>> {
    let month = nth_month(ctx, interval)?;
    Ok(vec![arbitrator::find(month, ordinal, weekday)?])
}

fn yearly_fixed_date(
    day_of_month: u32,
    month: u32,
    year_interval: u32,
    ctx: CycleContext,
) -> EngineResult<Vec<DateCursor>> {
    let year = nth_year(ctx, year_interval)?;
    match NaiveDate::from_ymd_opt(year, month, day_of_month) {
        Some(date) => Ok(vec![DateCursor::new(date)]),
        None => {
            tracing::debug!(
                cycle = ctx.index,
                year,
                month,
                day_of_month,
                "Date does not exist this year, skipping cycle"
            );
            Ok(Vec::new())
        }
    }
}

fn yearly_nth_weekday(
    ordinal: Ordinal,
    weekday: chrono::Weekday,
    month: u32,
    year_interval: u32,
    ctx: CycleContext,
) -> EngineResult<Vec<DateCursor>> {
    let year = nth_year(ctx, year_interval)?;
    let month_start = DateCursor::from_ymd(year, month, 1)?;
    Ok(vec![arbitrator::find(month_start, ordinal, weekday)?])
}

/// Number of periods between the first period and the one of this cycle.
fn period_offset(ctx: CycleContext, interval: u32) -> EngineResult<i64> {
    i64::from(ctx.index)
        .checked_mul(i64::from(interval))
        .ok_or_else(|| out_of_range(ctx, "period offset"))
}

/// Monday of the week this cycle covers.
fn nth_week(ctx: CycleContext, week_interval: u32) -> EngineResult<DateCursor> {
    let days = period_offset(ctx, week_interval)?
        .checked_mul(7)
        .ok_or_else(|| out_of_range(ctx, "week offset"))?;
    ctx.origin.monday_of_week()?.add_days(days)
}

fn nth_month(ctx: CycleContext, interval: u32) -> EngineResult<DateCursor> {
    let months = i32::try_from(period_offset(ctx, interval)?)
        .map_err(|_err| out_of_range(ctx, "month offset"))?;
    ctx.origin.first_of_month().add_months(months)
}

fn nth_year(ctx: CycleContext, year_interval: u32) -> EngineResult<i32> {
    i32::try_from(period_offset(ctx, year_interval)?)
        .ok()
        .and_then(|years| ctx.origin.year().checked_add(years))
        .ok_or_else(|| out_of_range(ctx, "year offset"))
}

fn out_of_range(ctx: CycleContext, what: &str) -> EngineError {
    EngineError::DateOutOfRange(format!(
        "{what} of cycle {} from {} overflows",
        ctx.index, ctx.origin
    ))
}
