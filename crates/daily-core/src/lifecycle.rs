//! Starting and stopping work sessions and breaks.
//!
//! `start_break` stops a running session before the break begins, but
//! `start_session` does not reject an active break. Callers that want strict
//! exclusion stop the break themselves first.

use chrono::{DateTime, TimeZone};

use crate::error::{LedgerError, ValidationError};
use crate::ledger::{Ledger, Span, fixed};

impl Ledger {
    /// Starts a work session at `now`.
    pub fn start_session<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        tags: Vec<String>,
        note: impl Into<String>,
    ) -> Result<(), LedgerError> {
        if let Some(active) = &self.active_session {
            return Err(ValidationError::AlreadyRunning {
                since: active.start,
            }
            .into());
        }
        self.active_session = Some(Span::open(fixed(now), tags, note.into()));
        Ok(())
    }

    /// Stops the running session, records it against `now`'s date and returns
    /// the whole minutes it lasted.
    pub fn stop_session<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<i64, LedgerError> {
        let now = fixed(now);
        let Some(active) = &self.active_session else {
            return Err(ValidationError::NoActiveSession.into());
        };
        if now < active.start {
            return Err(LedgerError::ClockSkew {
                start: active.start,
                stop: now,
            });
        }

        let closed = active.closed_at(now);
        let seconds = self.record_work(now.date_naive(), closed);
        self.active_session = None;
        tracing::debug!(seconds, date = %now.date_naive(), "session stopped");
        Ok(seconds / 60)
    }

    /// Starts a break at `now`, stopping any running session first.
    ///
    /// Returns the minutes logged by the stopped session, if there was one.
    pub fn start_break<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
    ) -> Result<Option<i64>, LedgerError> {
        if let Some(active) = &self.active_break {
            return Err(ValidationError::AlreadyOnBreak {
                since: active.start,
            }
            .into());
        }
        let stopped = if self.active_session.is_some() {
            Some(self.stop_session(now)?)
        } else {
            None
        };
        self.active_break = Some(Span::open(fixed(now), Vec::new(), String::new()));
        Ok(stopped)
    }

    /// Stops the running break and returns its length in whole minutes.
    pub fn stop_break<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<i64, LedgerError> {
        let now = fixed(now);
        let Some(active) = &self.active_break else {
            return Err(ValidationError::NoActiveBreak.into());
        };
        if now < active.start {
            return Err(LedgerError::ClockSkew {
                start: active.start,
                stop: now,
            });
        }

        let minutes = now.signed_duration_since(active.start).num_minutes();
        self.record_break(now.date_naive(), minutes);
        self.active_break = None;
        tracing::debug!(minutes, date = %now.date_naive(), "break stopped");
        Ok(minutes)
    }
}
