//! Shared utilities for CLI commands.

use std::fmt::Display;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative times (~1 year in minutes).
const MAX_RELATIVE_MINUTES: i64 = 365 * 24 * 60;

/// Parses a `--at` value relative to `now`.
///
/// Supports:
/// - RFC 3339: "2026-01-15T10:30:00+01:00"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_when<Tz: TimeZone>(s: &str, now: &DateTime<Tz>) -> anyhow::Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&now.timezone()));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s.trim()) else {
        anyhow::bail!(
            "Invalid time: {s}. Use RFC 3339 (e.g., 2026-01-15T10:30:00+01:00) or relative (e.g., '20 minutes ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let minutes_per_unit = match &caps[2] {
        "minute" => 1,
        "hour" => 60,
        "day" => 60 * 24,
        "week" => 60 * 24 * 7,
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > MAX_RELATIVE_MINUTES / minutes_per_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok(now.clone() - Duration::minutes(n * minutes_per_unit))
}

/// Formats a timestamp as a wall-clock time in `tz`, e.g. `9:05AM`.
pub fn clock_time<Src, Tz>(at: &DateTime<Src>, tz: &Tz) -> String
where
    Src: TimeZone,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%-I:%M%p").to_string()
}
