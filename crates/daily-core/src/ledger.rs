//! The persisted ledger: settings, active spans and per-day logs.
//!
//! A [`Ledger`] is loaded, mutated and saved once per operation cycle. Nothing
//! keeps one alive across invocations, so every caller threads it explicitly.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Default daily goal: twelve hours.
pub const DEFAULT_GOAL_MINUTES: i64 = 12 * 60;

/// Default break reminder interval.
pub const DEFAULT_BREAK_INTERVAL_MINUTES: i64 = 120;

/// A time interval. A span without `end` is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl Span {
    /// Creates a running span.
    pub fn open(start: DateTime<FixedOffset>, tags: Vec<String>, note: String) -> Self {
        Self {
            start,
            end: None,
            tags,
            note,
        }
    }

    /// Returns a closed copy of this span ending at `end`.
    #[must_use]
    pub fn closed_at(&self, end: DateTime<FixedOffset>) -> Self {
        Self {
            start: self.start,
            end: Some(end),
            tags: self.tags.clone(),
            note: self.note.clone(),
        }
    }

    /// Whole minutes between `start` and `end` (or `now` while running).
    ///
    /// Negative intervals count as zero.
    pub fn elapsed_minutes<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let end = self.end.unwrap_or_else(|| fixed(now));
        end.signed_duration_since(self.start).num_minutes().max(0)
    }
}

/// Aggregated record for one local calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLog {
    pub date: NaiveDate,
    /// Older writers store `null` for days with breaks but no work.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<Span>,
    #[serde(default)]
    pub total_work_minutes: i64,
    /// Zero in logs written before seconds were tracked.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_work_seconds: i64,
    #[serde(default)]
    pub total_break_minutes: i64,
    #[serde(default)]
    pub break_count: i64,
    /// The global goal as of the last work write to this day.
    #[serde(default, rename = "goal_minutes")]
    pub goal_minutes_snapshot: i64,
}

impl DayLog {
    pub fn new(date: NaiveDate, goal_minutes: i64) -> Self {
        Self {
            date,
            sessions: Vec::new(),
            total_work_minutes: 0,
            total_work_seconds: 0,
            total_break_minutes: 0,
            break_count: 0,
            goal_minutes_snapshot: goal_minutes,
        }
    }
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip_serializing_if passes a reference"
)]
const fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The whole persisted state document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub goal_minutes: i64,
    #[serde(default)]
    pub break_interval_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_session: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_break: Option<Span>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: BTreeMap<NaiveDate, DayLog>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            goal_minutes: DEFAULT_GOAL_MINUTES,
            break_interval_minutes: DEFAULT_BREAK_INTERVAL_MINUTES,
            active_session: None,
            active_break: None,
            days: BTreeMap::new(),
        }
    }
}

impl Ledger {
    /// Backfills settings left at zero by older or hand-edited documents.
    pub const fn ensure_defaults(&mut self) {
        if self.goal_minutes == 0 {
            self.goal_minutes = DEFAULT_GOAL_MINUTES;
        }
        if self.break_interval_minutes == 0 {
            self.break_interval_minutes = DEFAULT_BREAK_INTERVAL_MINUTES;
        }
    }

    /// Returns the log for `date`, creating it with the current goal if missing.
    pub fn day_log_mut(&mut self, date: NaiveDate) -> &mut DayLog {
        let goal = self.goal_minutes;
        self.days
            .entry(date)
            .or_insert_with(|| DayLog::new(date, goal))
    }

    pub fn day_log(&self, date: NaiveDate) -> Option<&DayLog> {
        self.days.get(&date)
    }

    /// Sets the daily goal in minutes.
    pub const fn set_goal_minutes(&mut self, minutes: i64) -> Result<(), ValidationError> {
        if minutes <= 0 {
            return Err(ValidationError::NonPositive {
                field: "goal",
                value: minutes,
            });
        }
        self.goal_minutes = minutes;
        Ok(())
    }

    /// Sets the break reminder interval in minutes.
    pub const fn set_break_interval_minutes(&mut self, minutes: i64) -> Result<(), ValidationError> {
        if minutes <= 0 {
            return Err(ValidationError::NonPositive {
                field: "break interval",
                value: minutes,
            });
        }
        self.break_interval_minutes = minutes;
        Ok(())
    }
}

/// Interprets a goal given on the command line: values up to 24 are hours,
/// anything larger is minutes.
pub const fn parse_goal_minutes(input: i64) -> Result<i64, ValidationError> {
    if input <= 0 {
        return Err(ValidationError::NonPositive {
            field: "goal",
            value: input,
        });
    }
    if input <= 24 {
        return Ok(input * 60);
    }
    Ok(input)
}

/// Converts a timestamp in any zone to the fixed offset it carries.
pub fn fixed<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<FixedOffset> {
    at.with_timezone(&at.offset().fix())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 2, h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let ledger = Ledger::default();
        assert_eq!(ledger.goal_minutes, 720);
        assert_eq!(ledger.break_interval_minutes, 120);
        assert!(ledger.days.is_empty());
    }

    #[test]
    fn test_ensure_defaults_backfills_zero_settings() {
        let mut ledger = Ledger {
            goal_minutes: 0,
            break_interval_minutes: 45,
            ..Ledger::default()
        };
        ledger.ensure_defaults();
        assert_eq!(ledger.goal_minutes, DEFAULT_GOAL_MINUTES);
        assert_eq!(ledger.break_interval_minutes, 45);
    }

    #[test]
    fn test_parse_goal_treats_small_values_as_hours() {
        assert_eq!(parse_goal_minutes(8).unwrap(), 480);
        assert_eq!(parse_goal_minutes(24).unwrap(), 1440);
        assert_eq!(parse_goal_minutes(25).unwrap(), 25);
        assert_eq!(parse_goal_minutes(450).unwrap(), 450);
    }

    #[test]
    fn test_parse_goal_rejects_non_positive() {
        assert!(matches!(
            parse_goal_minutes(0),
            Err(ValidationError::NonPositive { value: 0, .. })
        ));
        assert!(parse_goal_minutes(-3).is_err());
    }

    #[test]
    fn test_setters_reject_non_positive() {
        let mut ledger = Ledger::default();
        assert!(ledger.set_goal_minutes(0).is_err());
        assert!(ledger.set_break_interval_minutes(-5).is_err());
        ledger.set_break_interval_minutes(50).unwrap();
        assert_eq!(ledger.break_interval_minutes, 50);
        assert_eq!(ledger.goal_minutes, DEFAULT_GOAL_MINUTES);
    }

    #[test]
    fn test_span_serialization_omits_empty_fields() {
        let span = Span::open(at(9, 0), Vec::new(), String::new());
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#"{"start":"2025-06-02T09:00:00+02:00"}"#);
    }

    #[test]
    fn test_elapsed_minutes_floors_and_clamps() {
        let span = Span::open(at(9, 0), Vec::new(), String::new());
        let later = at(9, 59) + chrono::Duration::seconds(59);
        assert_eq!(span.elapsed_minutes(&later), 59);
        assert_eq!(span.elapsed_minutes(&at(8, 0)), 0);
        assert_eq!(span.closed_at(at(10, 30)).elapsed_minutes(&at(23, 0)), 90);
    }

    #[test]
    fn test_legacy_day_log_without_seconds_parses() {
        let json = r#"{
            "date": "2024-11-05",
            "sessions": [],
            "total_work_minutes": 95,
            "total_break_minutes": 10,
            "break_count": 1,
            "goal_minutes": 480
        }"#;
        let log: DayLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.total_work_seconds, 0);
        assert_eq!(log.total_work_minutes, 95);
        assert_eq!(log.goal_minutes_snapshot, 480);
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
    }

    #[test]
    fn test_null_collections_read_as_empty() {
        let json = r#"{
            "goal_minutes": 480,
            "break_interval_minutes": 60,
            "days": null
        }"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        assert!(ledger.days.is_empty());

        let log: DayLog = serde_json::from_str(
            r#"{"date": "2024-11-06", "sessions": null, "break_count": 2}"#,
        )
        .unwrap();
        assert!(log.sessions.is_empty());
        assert_eq!(log.break_count, 2);
    }
}
