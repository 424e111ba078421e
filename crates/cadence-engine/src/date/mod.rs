//! Calendar primitives used by the expansion engine.
//!
//! All values here are `Copy` and every operation returns a new value.

pub mod arbitrator;
mod cursor;
mod time_of_day;
pub mod weekday;

pub use arbitrator::Ordinal;
pub use cursor::DateCursor;
pub use time_of_day::TimeOfDay;
pub use weekday::WeekdaySet;
