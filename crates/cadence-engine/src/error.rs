use chrono::NaiveDate;
use thiserror::Error;

/// Expansion and decoding errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown recurrence pattern kind: {0}")]
    UnknownPatternKind(String),

    #[error("Unknown stop condition kind: {0}")]
    UnknownStopConditionKind(String),

    #[error("Invalid weekday arbitration: {0}")]
    InvalidWeekdayArbitration(String),

    #[error("Recurrence diverged after {cycles} cycles (cursor at {cursor})")]
    RecurrenceDiverged { cycles: u32, cursor: NaiveDate },

    #[error("Invalid serie: {0}")]
    InvalidSerie(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] cadence_core::error::CoreError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
