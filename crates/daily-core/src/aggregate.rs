//! Accumulation rules shared by every path that closes a span.
//!
//! Work is tracked to the second and `total_work_minutes` is always derived
//! from the seconds total. Breaks are tracked in whole minutes only.

use chrono::NaiveDate;

use crate::ledger::{Ledger, Span};

impl Ledger {
    /// Records a closed work span against `date` and returns its length in seconds.
    ///
    /// Logs that predate seconds tracking are upgraded first, so their stored
    /// minutes are not lost when the new seconds are added.
    pub(crate) fn record_work(&mut self, date: NaiveDate, span: Span) -> i64 {
        let seconds = span
            .end
            .map_or(0, |end| end.signed_duration_since(span.start).num_seconds());
        let goal = self.goal_minutes;
        let log = self.day_log_mut(date);
        if log.total_work_seconds == 0 && log.total_work_minutes > 0 {
            log.total_work_seconds = log.total_work_minutes * 60;
        }
        log.sessions.push(span);
        log.total_work_seconds += seconds;
        log.total_work_minutes = log.total_work_seconds / 60;
        log.goal_minutes_snapshot = goal;
        seconds
    }

    /// Records one break of `minutes` against `date`.
    pub(crate) fn record_break(&mut self, date: NaiveDate, minutes: i64) {
        let log = self.day_log_mut(date);
        log.total_break_minutes += minutes;
        log.break_count += 1;
    }
}
