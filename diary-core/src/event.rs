//! Diary event type.
//!
//! An event is stored in the events file as a JSON object:
//! `{"title": ..., "iso": "2024-03-20T15:00:00", "location": ..., "repeat": 7}`
//! where `location` and `repeat` are omitted when unset.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{DiaryError, DiaryResult};

/// A single diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    pub title: String,

    /// Local date and time of the event (no timezone)
    #[serde(rename = "iso", with = "iso_datetime")]
    pub timestamp: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Repeat every N days, starting from `timestamp`
    #[serde(rename = "repeat", default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<u32>,
}

impl Event {
    /// Build a validated event. An empty location is stored as no location.
    pub fn new(
        title: impl Into<String>,
        timestamp: NaiveDateTime,
        location: Option<String>,
        repeat_interval: Option<u32>,
    ) -> DiaryResult<Self> {
        let title: String = title.into();
        let event = Event {
            title: title.trim().to_string(),
            timestamp,
            location: location
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            repeat_interval,
        };

        event.validate().map_err(DiaryError::InvalidInput)?;
        Ok(event)
    }

    /// Check the invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("event title must not be empty".to_string());
        }
        if self.repeat_interval == Some(0) {
            return Err(format!(
                "repeat interval of '{}' must be a positive number of days",
                self.title
            ));
        }
        Ok(())
    }

    /// A copy of this event placed at another occurrence time.
    pub fn occurring_at(&self, timestamp: NaiveDateTime) -> Event {
        Event {
            timestamp,
            ..self.clone()
        }
    }

    /// Location, if set to something non-blank.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Long date label, e.g. "Wed, Mar 20"
    pub fn date_label(&self) -> String {
        self.timestamp.format("%a, %b %d").to_string()
    }

    /// Time label, e.g. "15:00"
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    /// Repeat suffix: "every day", "every week" or "every N days".
    pub fn repeat_label(&self) -> Option<String> {
        self.repeat_interval.map(|days| match days {
            1 => "every day".to_string(),
            7 => "every week".to_string(),
            n => format!("every {} days", n),
        })
    }
}

/// "Title, Location" with the first letter of each part upper-cased.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", capitalize_first(&self.title))?;
        if let Some(location) = self.location() {
            write!(f, ", {}", capitalize_first(location))?;
        }
        Ok(())
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// User input parsing
// =============================================================================

/// Parse a date typed by the user.
///
/// Tries `format` first, then falls back to splitting on any non-digit so that
/// `2024/3/20` and `2024.03.20` are accepted as year, month, day.
pub fn parse_date(input: &str, format: &str) -> DiaryResult<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, format) {
        return Ok(date);
    }

    let invalid = || DiaryError::InvalidInput(format!("Could not parse date: \"{}\"", input));

    match digit_groups(input).as_slice() {
        [year, month, day] => {
            let year = i32::try_from(*year).map_err(|_| invalid())?;
            let month = u32::try_from(*month).map_err(|_| invalid())?;
            let day = u32::try_from(*day).map_err(|_| invalid())?;
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Parse a time of day typed by the user (`HH:MM`, `9.30`, `14 05 30`).
pub fn parse_time(input: &str, format: &str) -> DiaryResult<NaiveTime> {
    let input = input.trim();
    if let Ok(time) = NaiveTime::parse_from_str(input, format) {
        return Ok(time);
    }

    let invalid = || DiaryError::InvalidInput(format!("Could not parse time: \"{}\"", input));

    let (hour, minute, second) = match digit_groups(input).as_slice() {
        [h, m] => (*h, *m, 0),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    let hour = u32::try_from(hour).map_err(|_| invalid())?;
    let minute = u32::try_from(minute).map_err(|_| invalid())?;
    let second = u32::try_from(second).map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Parse a repeat interval. Blank input means "does not repeat".
pub fn parse_repeat(input: &str) -> DiaryResult<Option<u32>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<i64>() {
        Ok(days) if days > 0 => u32::try_from(days).map(Some).map_err(|_| {
            DiaryError::InvalidInput(format!("Repeat interval {} is too large", days))
        }),
        Ok(days) => Err(DiaryError::InvalidInput(format!(
            "Repeat interval must be a positive number of days, got {}",
            days
        ))),
        Err(_) => Err(DiaryError::InvalidInput(format!(
            "Repeat interval must be a whole number of days, got \"{}\"",
            input
        ))),
    }
}

fn digit_groups(input: &str) -> Vec<i64> {
    input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().unwrap_or(i64::MAX))
        .collect()
}

// =============================================================================
// Serde helpers for the "iso" field
// =============================================================================

mod iso_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    const READ_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 date-time \"{}\"", raw)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn new_trims_and_drops_empty_location() {
        let event = Event::new("  dentist ", at(2024, 3, 20, 15, 0), Some("  ".into()), None)
            .unwrap();
        assert_eq!(event.title, "dentist");
        assert_eq!(event.location, None);
    }

    #[test]
    fn new_rejects_empty_title() {
        let err = Event::new("   ", at(2024, 3, 20, 15, 0), None, None).unwrap_err();
        assert!(matches!(err, DiaryError::InvalidInput(_)));
    }

    #[test]
    fn new_rejects_zero_repeat() {
        let err = Event::new("gym", at(2024, 3, 20, 15, 0), None, Some(0)).unwrap_err();
        assert!(matches!(err, DiaryError::InvalidInput(_)));
    }

    #[test]
    fn serializes_with_store_keys() {
        let event = Event::new("gym", at(2024, 3, 20, 7, 30), None, Some(2)).unwrap();
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"title":"gym","iso":"2024-03-20T07:30:00","repeat":2}"#);
    }

    #[test]
    fn deserializes_minute_precision_iso() {
        let event: Event =
            serde_json::from_str(r#"{"title":"gym","iso":"2024-03-20T07:30","location":"Park"}"#)
                .unwrap();
        assert_eq!(event.timestamp, at(2024, 3, 20, 7, 30));
        assert_eq!(event.location.as_deref(), Some("Park"));
        assert_eq!(event.repeat_interval, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<Event, _> =
            serde_json::from_str(r#"{"title":"gym","iso":"2024-03-20T07:30","date":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_repeat() {
        let result: Result<Event, _> =
            serde_json::from_str(r#"{"title":"gym","iso":"2024-03-20T07:30","repeat":-1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn display_capitalizes_title_and_location() {
        let event = Event::new("lunch", at(2024, 3, 20, 12, 0), Some("café rouge".into()), None)
            .unwrap();
        assert_eq!(event.to_string(), "Lunch, Café rouge");
    }

    #[test]
    fn labels() {
        let event = Event::new("lunch", at(2024, 3, 20, 12, 5), None, Some(7)).unwrap();
        assert_eq!(event.date_label(), "Wed, Mar 20");
        assert_eq!(event.time_label(), "12:05");
        assert_eq!(event.repeat_label().as_deref(), Some("every week"));
    }

    #[test]
    fn repeat_labels() {
        let label = |repeat| {
            Event::new("gym", at(2024, 3, 20, 7, 0), None, repeat)
                .unwrap()
                .repeat_label()
        };
        assert_eq!(label(None), None);
        assert_eq!(label(Some(1)).as_deref(), Some("every day"));
        assert_eq!(label(Some(7)).as_deref(), Some("every week"));
        assert_eq!(label(Some(14)).as_deref(), Some("every 14 days"));
    }

    // --- input parsing ---

    #[test]
    fn parse_date_with_format() {
        let date = parse_date("2024-03-20", "%Y-%m-%d").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    }

    #[test]
    fn parse_date_lenient_separators() {
        let date = parse_date("2024/3/5", "%Y-%m-%d").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn parse_date_rejects_impossible_dates() {
        assert!(parse_date("2024-13-01", "%Y-%m-%d").is_err());
        assert!(parse_date("2023-02-29", "%Y-%m-%d").is_err());
        assert!(parse_date("tomorrow", "%Y-%m-%d").is_err());
    }

    #[test]
    fn parse_time_variants() {
        assert_eq!(
            parse_time("15:00", "%H:%M").unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("9.30", "%H:%M").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("25:00", "%H:%M").is_err());
        assert!(parse_time("noon", "%H:%M").is_err());
    }

    #[test]
    fn parse_repeat_values() {
        assert_eq!(parse_repeat("").unwrap(), None);
        assert_eq!(parse_repeat(" 14 ").unwrap(), Some(14));
        assert!(parse_repeat("0").is_err());
        assert!(parse_repeat("-3").is_err());
        assert!(parse_repeat("weekly").is_err());
    }
}
