//! Weekday numbering and weekday sets.
//!
//! Weekdays cross the wire as integers `0=Sunday .. 6=Saturday`; inside the
//! engine they are always [`chrono::Weekday`].

use chrono::Weekday;

/// Weekdays in the order occurrences are emitted within a week.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Converts a Sunday-based index into a weekday.
#[must_use]
pub fn from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Sunday-based index of a weekday.
#[must_use]
pub fn sunday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    u8::try_from(weekday.num_days_from_sunday()).unwrap_or_default()
}

#[must_use]
pub const fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Set of weekdays flagged active in a weekly pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet([bool; 7]);

impl WeekdaySet {
    /// Builds a set from flags indexed `0=Sunday .. 6=Saturday`.
    #[must_use]
    pub const fn from_sunday_flags(flags: [bool; 7]) -> Self {
        Self(flags)
    }

    #[must_use]
    pub const fn sunday_flags(self) -> [bool; 7] {
        self.0
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.0[usize::from(sunday_index(weekday))]
    }

    #[must_use]
    pub fn with(mut self, weekday: Weekday) -> Self {
        self.0[usize::from(sunday_index(weekday))] = true;
        self
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.0.contains(&true)
    }

    /// Active weekdays, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEK_ORDER.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}
