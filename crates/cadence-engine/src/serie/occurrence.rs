//! Concrete occurrences produced by expansion.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

/// One dated and timed instance of a serie.
///
/// Only the engine constructs occurrences; callers read them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub(crate) start_date_time: NaiveDateTime,
    pub(crate) end_date_time: NaiveDateTime,
    pub(crate) title: String,
    pub(crate) title_alt: Option<String>,
    pub(crate) color_tag: Option<String>,
    pub(crate) metadata: Map<String, Value>,
}

impl Occurrence {
    #[must_use]
    pub const fn start_date_time(&self) -> NaiveDateTime {
        self.start_date_time
    }

    #[must_use]
    pub const fn end_date_time(&self) -> NaiveDateTime {
        self.end_date_time
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn title_alt(&self) -> Option<&str> {
        self.title_alt.as_deref()
    }

    #[must_use]
    pub fn color_tag(&self) -> Option<&str> {
        self.color_tag.as_deref()
    }

    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Whether the occurrence intersects the half-open window `[from, to)`.
    #[must_use]
    pub fn overlaps(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.start_date_time < to && self.end_date_time > from
    }
}
