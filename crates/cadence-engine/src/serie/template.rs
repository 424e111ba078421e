//! The repeating-event template copied onto every occurrence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Occurrence;
use crate::date::{DateCursor, TimeOfDay};
use crate::error::{EngineError, EngineResult};

/// Base event of a serie.
///
/// Only the two times of day and `day_span` are interpreted by the engine;
/// every other field is passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerieTemplate {
    pub title: String,
    #[serde(default)]
    pub title_alt: Option<String>,
    pub start_time_of_day: TimeOfDay,
    pub end_time_of_day: TimeOfDay,
    /// Calendar days between an occurrence's start date and its end date.
    #[serde(default)]
    pub day_span: u32,
    #[serde(default)]
    pub color_tag: Option<String>,
    /// Capacity, ticket codes, responsible party, room and people references.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl SerieTemplate {
    #[must_use]
    pub fn new(title: impl Into<String>, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            title: title.into(),
            title_alt: None,
            start_time_of_day: start,
            end_time_of_day: end,
            day_span: 0,
            color_tag: None,
            metadata: Map::new(),
        }
    }

    #[must_use]
    pub fn with_title_alt(mut self, title_alt: impl Into<String>) -> Self {
        self.title_alt = Some(title_alt.into());
        self
    }

    #[must_use]
    pub const fn with_day_span(mut self, day_span: u32) -> Self {
        self.day_span = day_span;
        self
    }

    #[must_use]
    pub fn with_color_tag(mut self, color_tag: impl Into<String>) -> Self {
        self.color_tag = Some(color_tag.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// ## Summary
    /// Checks that an occurrence built from this template ends after it starts.
    ///
    /// ## Errors
    /// Returns `EngineError::InvalidSerie` for same-day templates whose end
    /// time is not after their start time.
    pub fn validate(&self) -> EngineResult<()> {
        if self.day_span == 0 && self.end_time_of_day <= self.start_time_of_day {
            return Err(EngineError::InvalidSerie(format!(
                "template ends at {} which is not after its start at {} (set daySpan for overnight events)",
                self.end_time_of_day, self.start_time_of_day
            )));
        }
        Ok(())
    }

    /// ## Summary
    /// Materializes the template on a calendar date.
    ///
    /// ## Errors
    /// Returns `EngineError::DateOutOfRange` if the end date overflows the calendar.
    pub fn occurrence_on(&self, date: DateCursor) -> EngineResult<Occurrence> {
        let start = date.with_time_of_day(self.start_time_of_day);
        let end = date
            .add_days(i64::from(self.day_span))?
            .with_time_of_day(self.end_time_of_day);

        Ok(Occurrence {
            start_date_time: start,
            end_date_time: end,
            title: self.title.clone(),
            title_alt: self.title_alt.clone(),
            color_tag: self.color_tag.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_occurrence_copies_pass_through_fields() {
        let template = SerieTemplate::new("Yoga", time("09:00"), time("10:00"))
            .with_title_alt("Yoga (EN)")
            .with_color_tag("green")
            .with_metadata("capacity", 12)
            .with_metadata("rooms", serde_json::json!(["studio-2"]));

        let date = DateCursor::from_ymd(2024, 5, 6).unwrap();
        let occurrence = template.occurrence_on(date).unwrap();

        assert_eq!(occurrence.start_date_time().to_string(), "2024-05-06 09:00:00");
        assert_eq!(occurrence.end_date_time().to_string(), "2024-05-06 10:00:00");
        assert_eq!(occurrence.title(), "Yoga");
        assert_eq!(occurrence.title_alt(), Some("Yoga (EN)"));
        assert_eq!(occurrence.color_tag(), Some("green"));
        assert_eq!(occurrence.metadata(), &template.metadata);
    }

    #[test]
    fn test_day_span_moves_end_date() {
        let template = SerieTemplate::new("Retreat", time("18:00"), time("12:00")).with_day_span(2);
        let occurrence = template
            .occurrence_on(DateCursor::from_ymd(2024, 1, 9).unwrap())
            .unwrap();

        assert_eq!(occurrence.end_date_time().to_string(), "2024-01-11 12:00:00");
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_same_day_end_must_follow_start() {
        let template = SerieTemplate::new("Backwards", time("10:00"), time("09:00"));
        assert!(matches!(
            template.validate(),
            Err(EngineError::InvalidSerie(_))
        ));

        let zero_length = SerieTemplate::new("Instant", time("10:00"), time("10:00"));
        assert!(zero_length.validate().is_err());
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let template: SerieTemplate = serde_json::from_str(
            r#"{"title":"Standup","startTimeOfDay":"09:00","endTimeOfDay":"09:15"}"#,
        )
        .unwrap();

        assert_eq!(template.day_span, 0);
        assert!(template.title_alt.is_none());
        assert!(template.metadata.is_empty());
    }
}
