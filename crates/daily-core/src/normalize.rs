//! Day-boundary normalization.
//!
//! An active span that started before today's local date is split at the
//! first midnight after its start: the part before midnight is credited to
//! the start date through the same accumulation path as an explicit stop,
//! and the live span is rebased to that midnight. Each call folds one
//! boundary; [`Ledger::catch_up`] repeats the fold until nothing changes.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveTime, TimeZone};

use crate::ledger::{Ledger, Span, fixed};

/// Which active span a closed portion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Work,
    Break,
}

/// A portion of an active span closed off at a day boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSpan {
    pub kind: SpanKind,
    /// The day the portion was credited to.
    pub date: NaiveDate,
    pub span: Span,
}

impl Ledger {
    /// Folds at most one day boundary for each active span.
    ///
    /// Returns the closed portions that were recorded. Calling it again with
    /// the same `now` once every span has caught up changes nothing.
    pub fn normalize<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Vec<ClosedSpan> {
        let mut closed = Vec::new();

        if let Some(active) = self.active_session.clone() {
            if let Some(midnight) = boundary_after(&active.start, now) {
                let date = local_date(&active.start, now);
                let portion = active.closed_at(midnight);
                if midnight.signed_duration_since(active.start).num_seconds() > 0 {
                    self.record_work(date, portion.clone());
                    closed.push(ClosedSpan {
                        kind: SpanKind::Work,
                        date,
                        span: portion,
                    });
                }
                if let Some(session) = self.active_session.as_mut() {
                    session.start = midnight;
                }
                tracing::debug!(%date, %midnight, "split active session at midnight");
            }
        }

        if let Some(active) = self.active_break.clone() {
            if let Some(midnight) = boundary_after(&active.start, now) {
                let date = local_date(&active.start, now);
                let minutes = midnight.signed_duration_since(active.start).num_minutes();
                if minutes > 0 {
                    self.record_break(date, minutes);
                    closed.push(ClosedSpan {
                        kind: SpanKind::Break,
                        date,
                        span: active.closed_at(midnight),
                    });
                }
                if let Some(brk) = self.active_break.as_mut() {
                    brk.start = midnight;
                }
                tracing::debug!(%date, %midnight, minutes, "split active break at midnight");
            }
        }

        closed
    }

    /// Repeats [`Ledger::normalize`] until both active spans start today.
    pub fn catch_up<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Vec<ClosedSpan> {
        let mut closed = Vec::new();
        loop {
            let before = self.active_starts();
            closed.extend(self.normalize(now));
            if self.active_starts() == before {
                return closed;
            }
        }
    }

    fn active_starts(&self) -> (Option<DateTime<FixedOffset>>, Option<DateTime<FixedOffset>>) {
        (
            self.active_session.as_ref().map(|s| s.start),
            self.active_break.as_ref().map(|s| s.start),
        )
    }
}

/// The calendar date of `at` in `now`'s time zone.
fn local_date<Tz: TimeZone>(at: &DateTime<FixedOffset>, now: &DateTime<Tz>) -> NaiveDate {
    at.with_timezone(&now.timezone()).date_naive()
}

/// The first local midnight after `start`, when `start` falls on an earlier
/// date than `now`.
fn boundary_after<Tz: TimeZone>(
    start: &DateTime<FixedOffset>,
    now: &DateTime<Tz>,
) -> Option<DateTime<FixedOffset>> {
    let start_date = local_date(start, now);
    if start_date >= now.date_naive() {
        return None;
    }
    let midnight = local_midnight(&now.timezone(), start_date.succ_opt()?)?;
    (midnight > *start).then_some(midnight)
}

/// Start of `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. If a DST gap skips
/// midnight entirely, 01:00 is used instead.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    match tz.from_local_datetime(&date.and_time(NaiveTime::MIN)) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(fixed(&dt)),
        LocalResult::None => {
            let one_am = NaiveTime::from_hms_opt(1, 0, 0)?;
            tz.from_local_datetime(&date.and_time(one_am))
                .earliest()
                .map(|dt| fixed(&dt))
        }
    }
}
