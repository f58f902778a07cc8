//! Calendar week identifiers for secret rotation.
//!
//! A [`WeekId`] names the ISO 8601 week a secret belongs to and is the key
//! under which the secret is persisted. ISO weeks start on Monday, and the
//! year component is the ISO week-based year, which differs from the calendar
//! year around January 1 (e.g. 2025-12-29 falls in week `2026-W01`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ISO 8601 week, displayed and persisted as `YYYY-Www` (e.g. `2026-W34`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WeekId {
    year: i32,
    week: u32,
}

impl WeekId {
    /// The week containing the current UTC date.
    pub fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    /// The week containing the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        WeekId {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// The ISO week-based year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The week number within the year (1-53).
    pub fn week(&self) -> u32 {
        self.week
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

/// Error returned when a string is not a valid `YYYY-Www` week identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid week identifier {input:?}: expected the form YYYY-Www")]
pub struct ParseWeekIdError {
    input: String,
}

impl FromStr for WeekId {
    type Err = ParseWeekIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseWeekIdError {
            input: s.to_string(),
        };

        let (year_part, week_part) = s.split_once("-W").ok_or_else(err)?;
        let year: i32 = year_part.parse().map_err(|_| err())?;
        let week: u32 = week_part.parse().map_err(|_| err())?;

        if !(1..=53).contains(&week) {
            return Err(err());
        }

        Ok(WeekId { year, week })
    }
}

impl TryFrom<String> for WeekId {
    type Error = ParseWeekIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WeekId> for String {
    fn from(week: WeekId) -> String {
        week.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn formats_as_iso_week() {
        assert_eq!(WeekId::for_date(date(2026, 8, 22)).to_string(), "2026-W34");
        assert_eq!(WeekId::for_date(date(2024, 1, 1)).to_string(), "2024-W01");
    }

    #[test]
    fn year_boundary_uses_week_based_year() {
        // 2025-12-29 is the Monday of the first ISO week of 2026.
        assert_eq!(WeekId::for_date(date(2025, 12, 29)).to_string(), "2026-W01");
        // 2026 has 53 ISO weeks; its last week runs into January 2027.
        assert_eq!(WeekId::for_date(date(2027, 1, 1)).to_string(), "2026-W53");
    }

    #[test]
    fn dates_in_the_same_week_compare_equal() {
        // Monday through Sunday of week 34, 2026.
        let monday = WeekId::for_date(date(2026, 8, 17));
        let saturday = WeekId::for_date(date(2026, 8, 22));
        let sunday = WeekId::for_date(date(2026, 8, 23));

        assert_eq!(monday, saturday);
        assert_eq!(monday, sunday);
        assert_ne!(monday, WeekId::for_date(date(2026, 8, 24)));
    }

    #[test]
    fn parses_the_display_form() {
        let week: WeekId = "2026-W34".parse().unwrap();
        assert_eq!(week.year(), 2026);
        assert_eq!(week.week(), 34);
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for input in ["", "2026W34", "2026-34", "W34", "2026-Wxx", "abcd-W12"] {
            assert!(input.parse::<WeekId>().is_err(), "should reject {input:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_weeks() {
        assert!("2026-W00".parse::<WeekId>().is_err());
        assert!("2026-W54".parse::<WeekId>().is_err());
        assert!("2026-W53".parse::<WeekId>().is_ok());
    }

    #[test]
    fn serde_uses_the_string_form() {
        let week: WeekId = "2026-W34".parse().unwrap();
        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(json, "\"2026-W34\"");

        let parsed: WeekId = serde_json::from_str("\"2026-W01\"").unwrap();
        assert_eq!(parsed.week(), 1);

        assert!(serde_json::from_str::<WeekId>("\"2026-W99\"").is_err());
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        // Timestamps spanning the years 2000-2100
        (946684800i64..4102444800i64)
            .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap().date_naive())
    }

    proptest! {
        #[test]
        fn display_parse_roundtrip(d in arb_date()) {
            let week = WeekId::for_date(d);
            let parsed: WeekId = week.to_string().parse().unwrap();
            prop_assert_eq!(week, parsed);
        }

        #[test]
        fn week_number_is_in_range(d in arb_date()) {
            let week = WeekId::for_date(d);
            prop_assert!((1..=53).contains(&week.week()));
        }

        #[test]
        fn serde_roundtrip(d in arb_date()) {
            let week = WeekId::for_date(d);
            let json = serde_json::to_string(&week).unwrap();
            let parsed: WeekId = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(week, parsed);
        }
    }
}
