//! Expansion of recurring-event series into concrete dated occurrences.
//!
//! A [`Serie`] combines a [`SerieTemplate`], a [`RecurrencePattern`], a
//! [`StopCondition`] and a start date. [`expand`] walks the pattern cycle by
//! cycle and returns every [`Occurrence`] in ascending start order.

pub mod date;
pub mod error;
pub mod expand;
pub mod serie;
pub mod wire;

pub use error::{EngineError, EngineResult};
pub use expand::{ExpandOptions, Expansion, RunState, expand, expand_with};
pub use serie::{
    Occurrence, PatternKind, RecurrencePattern, Serie, SerieTemplate, StopCondition, StopKind,
};
pub use wire::{WireDecoder, decode_serie};
