//! Read-only views derived from a ledger.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::ledger::{DayLog, Ledger, fixed};

/// Work totals for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodaySummary {
    /// Stored minutes for today plus the running session.
    pub work_minutes: i64,
    /// Minutes on the running session, zero when none.
    pub active_minutes: i64,
}

impl Ledger {
    /// Today's work including the running session. Breaks never count as work.
    pub fn today_summary<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TodaySummary {
        let today = fixed(now).date_naive();
        let stored = self.day_log(today).map_or(0, |log| log.total_work_minutes);
        let active_minutes = self
            .active_session
            .as_ref()
            .map_or(0, |span| span.elapsed_minutes(now));
        TodaySummary {
            work_minutes: stored + active_minutes,
            active_minutes,
        }
    }

    /// Minutes on the running break, if there is one.
    pub fn break_minutes<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<i64> {
        self.active_break
            .as_ref()
            .map(|span| span.elapsed_minutes(now))
    }

    /// Up to `days` logs, newest first.
    pub fn history(&self, days: usize) -> Vec<&DayLog> {
        self.days.values().rev().take(days).collect()
    }
}

/// Share of the goal reached, in whole percent. Not capped at 100.
pub const fn goal_percent(work_minutes: i64, goal_minutes: i64) -> i64 {
    if goal_minutes <= 0 {
        return 0;
    }
    work_minutes * 100 / goal_minutes
}

/// Renders minutes as `45m`, `2h` or `1h05m`.
pub fn human_minutes(total: i64) -> String {
    if total < 60 {
        return format!("{total}m");
    }
    let hours = total / 60;
    let minutes = total % 60;
    if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h{minutes:02}m")
    }
}

/// A 10-character progress bar.
///
/// Any progress below 5% still shows a single block.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: i64, max: i64) -> String {
    if max <= 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value.max(0) as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
