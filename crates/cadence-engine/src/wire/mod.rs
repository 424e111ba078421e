//! JSON decoding of serie payloads.
//!
//! ## Summary
//! Pattern and stop objects carry a `kind` tag. The tag is resolved first so
//! that unknown kinds surface as `UnknownPatternKind` /
//! `UnknownStopConditionKind` rather than as generic payload errors; the
//! variant's fields are then read into a per-kind DTO and converted into the
//! engine types.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use cadence_core::config::{DEFAULT_PROJECTION_MONTHS, EngineConfig};

use crate::date::{Ordinal, WeekdaySet, weekday};
use crate::error::{EngineError, EngineResult};
use crate::serie::{PatternKind, RecurrencePattern, Serie, SerieTemplate, StopCondition, StopKind};

/// Top-level payload shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriePayload {
    start_date: NaiveDate,
    template: SerieTemplate,
    pattern: Value,
    stop: Value,
}

#[derive(Debug, Deserialize)]
struct KindTag {
    kind: String,
}

#[derive(Debug, Deserialize)]
struct IntervalDto {
    interval: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeeklyDto {
    week_interval: u32,
    active_weekdays: [bool; 7],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthlyFixedDayDto {
    day_of_month: u32,
    interval: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthlyNthWeekdayDto {
    ordinal: i64,
    weekday: i64,
    interval: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YearlyFixedDateDto {
    day_of_month: u32,
    month: u32,
    year_interval: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YearlyNthWeekdayDto {
    ordinal: i64,
    weekday: i64,
    month: u32,
    year_interval: u32,
}

#[derive(Debug, Deserialize)]
struct StopWithinDateDto {
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct StopAfterInstancesDto {
    count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoStopDateDto {
    #[serde(default)]
    projection_months: Option<u32>,
}

/// Decodes serie payloads, filling omitted values from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireDecoder {
    default_projection_months: u32,
}

impl Default for WireDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECTION_MONTHS)
    }
}

impl From<&EngineConfig> for WireDecoder {
    fn from(config: &EngineConfig) -> Self {
        Self::new(config.default_projection_months)
    }
}

impl WireDecoder {
    #[must_use]
    pub const fn new(default_projection_months: u32) -> Self {
        Self {
            default_projection_months,
        }
    }

    /// ## Summary
    /// Decodes a serie from JSON text.
    ///
    /// ## Errors
    /// - `EngineError::Payload` for malformed JSON or missing fields.
    /// - `EngineError::UnknownPatternKind` / `EngineError::UnknownStopConditionKind`
    ///   for unrecognised tags.
    /// - `EngineError::InvalidWeekdayArbitration` for ordinals outside `1..=5`.
    /// - `EngineError::InvalidSerie` for weekdays outside `0..=6`.
    pub fn decode(&self, json: &str) -> EngineResult<Serie> {
        let value: Value = serde_json::from_str(json)?;
        self.decode_value(value)
    }

    /// ## Summary
    /// Decodes a serie from an already parsed JSON value.
    ///
    /// ## Errors
    /// Same as [`WireDecoder::decode`].
    pub fn decode_value(&self, value: Value) -> EngineResult<Serie> {
        let payload: SeriePayload = serde_json::from_value(value)?;
        let pattern = decode_pattern(payload.pattern)?;
        let stop = self.decode_stop(payload.stop)?;

        tracing::trace!(
            pattern = %pattern.kind(),
            stop = %stop.kind(),
            start = %payload.start_date,
            "Decoded serie payload"
        );

        Ok(Serie::new(payload.template, pattern, stop, payload.start_date))
    }

    fn decode_stop(&self, value: Value) -> EngineResult<StopCondition> {
        let kind: StopKind = read_kind(&value)?.parse()?;
        let stop = match kind {
            StopKind::StopWithinDate => {
                let dto: StopWithinDateDto = fields(value)?;
                StopCondition::StopWithinDate { date: dto.date }
            }
            StopKind::StopAfterInstances => {
                let dto: StopAfterInstancesDto = fields(value)?;
                StopCondition::StopAfterInstances { count: dto.count }
            }
            StopKind::NoStopDate => {
                let dto: NoStopDateDto = fields(value)?;
                StopCondition::NoStopDate {
                    projection_months: dto
                        .projection_months
                        .unwrap_or(self.default_projection_months),
                }
            }
        };
        Ok(stop)
    }
}

/// ## Summary
/// Decodes a serie with the default projection window.
///
/// ## Errors
/// Same as [`WireDecoder::decode`].
pub fn decode_serie(json: &str) -> EngineResult<Serie> {
    WireDecoder::default().decode(json)
}

fn decode_pattern(value: Value) -> EngineResult<RecurrencePattern> {
    let kind: PatternKind = read_kind(&value)?.parse()?;
    let pattern = match kind {
        PatternKind::DailyEveryNDays => {
            let dto: IntervalDto = fields(value)?;
            RecurrencePattern::DailyEveryNDays {
                interval: dto.interval,
            }
        }
        PatternKind::DailyEveryWeekday => RecurrencePattern::DailyEveryWeekday,
        PatternKind::WeeklyStandard => {
            let dto: WeeklyDto = fields(value)?;
            RecurrencePattern::WeeklyStandard {
                week_interval: dto.week_interval,
                active_weekdays: WeekdaySet::from_sunday_flags(dto.active_weekdays),
            }
        }
        PatternKind::MonthlyFixedDayEveryNMonths => {
            let dto: MonthlyFixedDayDto = fields(value)?;
            RecurrencePattern::MonthlyFixedDayEveryNMonths {
                day_of_month: dto.day_of_month,
                interval: dto.interval,
            }
        }
        PatternKind::MonthlyNthWeekday => {
            let dto: MonthlyNthWeekdayDto = fields(value)?;
            RecurrencePattern::MonthlyNthWeekday {
                ordinal: ordinal(dto.ordinal)?,
                weekday: weekday_of(dto.weekday)?,
                interval: dto.interval,
            }
        }
        PatternKind::YearlyFixedDate => {
            let dto: YearlyFixedDateDto = fields(value)?;
            RecurrencePattern::YearlyFixedDate {
                day_of_month: dto.day_of_month,
                month: dto.month,
                year_interval: dto.year_interval,
            }
        }
        PatternKind::YearlyNthWeekday => {
            let dto: YearlyNthWeekdayDto = fields(value)?;
            RecurrencePattern::YearlyNthWeekday {
                ordinal: ordinal(dto.ordinal)?,
                weekday: weekday_of(dto.weekday)?,
                month: dto.month,
                year_interval: dto.year_interval,
            }
        }
    };
    Ok(pattern)
}

fn read_kind(value: &Value) -> EngineResult<String> {
    let tag = KindTag::deserialize(value)?;
    Ok(tag.kind)
}

fn fields<T: DeserializeOwned>(value: Value) -> EngineResult<T> {
    Ok(serde_json::from_value(value)?)
}

fn ordinal(raw: i64) -> EngineResult<Ordinal> {
    u8::try_from(raw)
        .map_err(|_err| {
            EngineError::InvalidWeekdayArbitration(format!(
                "ordinal {raw} is outside 1..=5 (5 = last)"
            ))
        })
        .and_then(Ordinal::from_index)
}

fn weekday_of(raw: i64) -> EngineResult<chrono::Weekday> {
    u8::try_from(raw)
        .ok()
        .and_then(weekday::from_sunday_index)
        .ok_or_else(|| {
            EngineError::InvalidSerie(format!("weekday {raw} is outside 0..=6 (0 = Sunday)"))
        })
}
