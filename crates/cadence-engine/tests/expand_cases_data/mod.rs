use crate::expand::{ExpandOptions, expand_with};
use crate::wire::WireDecoder;

pub struct ExpandCase {
    pub name: &'static str,
    pub start_date: &'static str,
    pub pattern: &'static str,
    pub stop: &'static str,
    pub day_span: u32,
    pub expected: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
    pub expected_error: Option<&'static str>,
}

impl ExpandCase {
    const fn new(name: &'static str, start_date: &'static str, pattern: &'static str, stop: &'static str) -> Self {
        Self {
            name,
            start_date,
            pattern,
            stop,
            day_span: 0,
            expected: None,
            expected_len: None,
            expected_error: None,
        }
    }

    const fn day_span(mut self, day_span: u32) -> Self {
        self.day_span = day_span;
        self
    }

    const fn expect(mut self, starts: &'static [&'static str]) -> Self {
        self.expected = Some(starts);
        self
    }

    const fn expect_len(mut self, len: usize) -> Self {
        self.expected_len = Some(len);
        self
    }

    const fn expect_error(mut self, fragment: &'static str) -> Self {
        self.expected_error = Some(fragment);
        self
    }

    fn payload(&self) -> String {
        format!(
            r#"{{
                "startDate": "{}",
                "template": {{ "title": "Case", "startTimeOfDay": "09:00",
                               "endTimeOfDay": "10:00", "daySpan": {} }},
                "pattern": {},
                "stop": {}
            }}"#,
            self.start_date, self.day_span, self.pattern, self.stop
        )
    }
}

#[expect(clippy::too_many_lines)]
pub fn expand_cases() -> Vec<ExpandCase> {
    vec![
        ExpandCase::new(
            "daily_every_other_day_until_date",
            "2024-01-01",
            r#"{ "kind": "dailyEveryNDays", "interval": 2 }"#,
            r#"{ "kind": "stopWithinDate", "date": "2024-01-05" }"#,
        )
        .expect(&["2024-01-01", "2024-01-03", "2024-01-05"]),
        ExpandCase::new(
            "daily_every_day_count",
            "2024-02-27",
            r#"{ "kind": "dailyEveryNDays", "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 4 }"#,
        )
        .expect(&["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]),
        ExpandCase::new(
            "daily_weekday_from_saturday",
            "2024-01-06",
            r#"{ "kind": "dailyEveryWeekday" }"#,
            r#"{ "kind": "stopAfterInstances", "count": 6 }"#,
        )
        .expect(&[
            "2024-01-08",
            "2024-01-09",
            "2024-01-10",
            "2024-01-11",
            "2024-01-12",
            "2024-01-15",
        ]),
        ExpandCase::new(
            "weekly_mon_wed_fri_count_two",
            "2024-01-01",
            r#"{ "kind": "weeklyStandard", "weekInterval": 1,
                 "activeWeekdays": [false, true, false, true, false, true, false] }"#,
            r#"{ "kind": "stopAfterInstances", "count": 2 }"#,
        )
        .expect(&["2024-01-01", "2024-01-03"]),
        ExpandCase::new(
            "weekly_every_other_week_with_sunday",
            "2024-01-01",
            r#"{ "kind": "weeklyStandard", "weekInterval": 2,
                 "activeWeekdays": [true, false, true, false, false, false, false] }"#,
            r#"{ "kind": "stopAfterInstances", "count": 4 }"#,
        )
        .expect(&["2024-01-02", "2024-01-07", "2024-01-16", "2024-01-21"]),
        ExpandCase::new(
            "monthly_day_31_skips_short_months",
            "2024-01-31",
            r#"{ "kind": "monthlyFixedDayEveryNMonths", "dayOfMonth": 31, "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 3 }"#,
        )
        .expect(&["2024-01-31", "2024-03-31", "2024-05-31"]),
        ExpandCase::new(
            "monthly_day_before_start_waits_a_month",
            "2024-01-20",
            r#"{ "kind": "monthlyFixedDayEveryNMonths", "dayOfMonth": 10, "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 2 }"#,
        )
        .expect(&["2024-02-10", "2024-03-10"]),
        ExpandCase::new(
            "monthly_every_quarter",
            "2024-11-15",
            r#"{ "kind": "monthlyFixedDayEveryNMonths", "dayOfMonth": 15, "interval": 3 }"#,
            r#"{ "kind": "stopWithinDate", "date": "2025-09-01" }"#,
        )
        .expect(&["2024-11-15", "2025-02-15", "2025-05-15", "2025-08-15"]),
        ExpandCase::new(
            "monthly_last_friday",
            "2024-02-01",
            r#"{ "kind": "monthlyNthWeekday", "ordinal": 5, "weekday": 5, "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 2 }"#,
        )
        .expect(&["2024-02-23", "2024-03-29"]),
        ExpandCase::new(
            "monthly_first_monday",
            "2024-09-01",
            r#"{ "kind": "monthlyNthWeekday", "ordinal": 1, "weekday": 1, "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 3 }"#,
        )
        .expect(&["2024-09-02", "2024-10-07", "2024-11-04"]),
        ExpandCase::new(
            "yearly_fixed_date",
            "2024-03-10",
            r#"{ "kind": "yearlyFixedDate", "dayOfMonth": 14, "month": 7, "yearInterval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 3 }"#,
        )
        .expect(&["2024-07-14", "2025-07-14", "2026-07-14"]),
        ExpandCase::new(
            "yearly_leap_day",
            "2024-01-01",
            r#"{ "kind": "yearlyFixedDate", "dayOfMonth": 29, "month": 2, "yearInterval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 2 }"#,
        )
        .expect(&["2024-02-29", "2028-02-29"]),
        ExpandCase::new(
            "yearly_fourth_thursday_of_november",
            "2024-01-01",
            r#"{ "kind": "yearlyNthWeekday", "ordinal": 4, "weekday": 4, "month": 11, "yearInterval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 3 }"#,
        )
        .expect(&["2024-11-28", "2025-11-27", "2026-11-26"]),
        ExpandCase::new(
            "multi_day_spillover_clipped",
            "2024-01-03",
            r#"{ "kind": "dailyEveryNDays", "interval": 1 }"#,
            r#"{ "kind": "stopWithinDate", "date": "2024-01-10" }"#,
        )
        .day_span(2)
        .expect(&["2024-01-03", "2024-01-06"]),
        ExpandCase::new(
            "projection_window_one_year",
            "2024-01-01",
            r#"{ "kind": "dailyEveryWeekday" }"#,
            r#"{ "kind": "noStopDate", "projectionMonths": 12 }"#,
        )
        .expect_len(263),
        ExpandCase::new(
            "zero_count_is_empty",
            "2024-01-01",
            r#"{ "kind": "dailyEveryNDays", "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 0 }"#,
        )
        .expect(&[]),
        ExpandCase::new(
            "stop_date_before_start_is_empty",
            "2024-01-10",
            r#"{ "kind": "dailyEveryNDays", "interval": 1 }"#,
            r#"{ "kind": "stopWithinDate", "date": "2024-01-01" }"#,
        )
        .expect(&[]),
        ExpandCase::new(
            "weekly_without_weekdays_diverges",
            "2024-01-01",
            r#"{ "kind": "weeklyStandard", "weekInterval": 1,
                 "activeWeekdays": [false, false, false, false, false, false, false] }"#,
            r#"{ "kind": "stopAfterInstances", "count": 1 }"#,
        )
        .expect_error("diverged"),
        ExpandCase::new(
            "weekly_without_weekdays_ends_at_projection",
            "2024-01-01",
            r#"{ "kind": "weeklyStandard", "weekInterval": 1,
                 "activeWeekdays": [false, false, false, false, false, false, false] }"#,
            r#"{ "kind": "noStopDate" }"#,
        )
        .expect(&[]),
        ExpandCase::new(
            "leap_day_in_common_years_ends_at_stop_date",
            "2025-01-01",
            r#"{ "kind": "yearlyFixedDate", "dayOfMonth": 29, "month": 2, "yearInterval": 4 }"#,
            r#"{ "kind": "stopWithinDate", "date": "2030-01-01" }"#,
        )
        .expect(&[]),
        ExpandCase::new(
            "unknown_pattern_kind",
            "2024-01-01",
            r#"{ "kind": "fortnightly" }"#,
            r#"{ "kind": "stopAfterInstances", "count": 1 }"#,
        )
        .expect_error("Unknown recurrence pattern kind"),
        ExpandCase::new(
            "unknown_stop_kind",
            "2024-01-01",
            r#"{ "kind": "dailyEveryWeekday" }"#,
            r#"{ "kind": "never" }"#,
        )
        .expect_error("Unknown stop condition kind"),
        ExpandCase::new(
            "ordinal_six_rejected",
            "2024-01-01",
            r#"{ "kind": "monthlyNthWeekday", "ordinal": 6, "weekday": 1, "interval": 1 }"#,
            r#"{ "kind": "stopAfterInstances", "count": 1 }"#,
        )
        .expect_error("Invalid weekday arbitration"),
    ]
}

pub fn assert_case(case: &ExpandCase) {
    let result = WireDecoder::default()
        .decode(&case.payload())
        .and_then(|serie| expand_with(&serie, &ExpandOptions::default()));

    if let Some(fragment) = case.expected_error {
        match result {
            Ok(expansion) => panic!(
                "Case {} expected an error mentioning `{fragment}`, got {} occurrences",
                case.name,
                expansion.len()
            ),
            Err(err) => assert!(
                err.to_string().contains(fragment),
                "Case {}: `{err}` does not mention `{fragment}`",
                case.name
            ),
        }
        return;
    }

    let expansion = result.unwrap_or_else(|err| panic!("Case {} failed: {err}", case.name));
    let actual: Vec<String> = expansion
        .occurrences()
        .iter()
        .map(|occurrence| occurrence.start_date_time().date().to_string())
        .collect();

    if let Some(expected) = case.expected {
        assert_eq!(actual, expected, "Case {} did not match", case.name);
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            actual.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}
