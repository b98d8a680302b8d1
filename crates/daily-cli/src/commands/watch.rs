//! Watch command: stops the running session once the machine goes idle.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use daily_core::{Milestones, human_minutes};
use daily_store::Store;

use crate::clock::Clock;
use crate::idle::IdleDetector;
use crate::notify::Notifier;

const TITLE: &str = "Daily";

/// How the watch loop polls.
#[derive(Debug, Clone, Copy)]
pub struct WatchSettings {
    pub idle_minutes: i64,
    pub interval: Duration,
}

/// What a single poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The ledger could not be read; retried on the next poll.
    LoadFailed,
    NoSession,
    /// A session is running and the user is active.
    Active,
    /// The session was stopped after `minutes` of work.
    AutoPaused { minutes: i64 },
    /// Stopping the session failed; retried on the next poll.
    StopFailed,
}

pub struct Watcher<'a, C, P, N> {
    store: &'a Store,
    clock: &'a C,
    detector: &'a P,
    notifier: &'a N,
    milestones: &'a Milestones<String>,
    settings: WatchSettings,
    last_work: Option<i64>,
}

impl<'a, C, P, N> Watcher<'a, C, P, N>
where
    C: Clock,
    P: IdleDetector,
    N: Notifier,
{
    pub fn new(
        store: &'a Store,
        clock: &'a C,
        detector: &'a P,
        notifier: &'a N,
        milestones: &'a Milestones<String>,
        settings: WatchSettings,
    ) -> Result<Self> {
        if settings.idle_minutes <= 0 {
            bail!("idle minutes must be > 0");
        }
        if settings.interval.is_zero() {
            bail!("poll interval must be > 0");
        }
        Ok(Self {
            store,
            clock,
            detector,
            notifier,
            milestones,
            settings,
            last_work: None,
        })
    }

    /// Polls forever. Only an idle check failure ends the loop.
    pub fn run<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        tracing::info!(
            idle_minutes = self.settings.idle_minutes,
            interval_secs = self.settings.interval.as_secs(),
            "watching for idle time"
        );
        loop {
            self.clock.sleep(self.settings.interval);
            self.tick(writer)?;
        }
    }

    /// Runs one poll.
    pub fn tick<W: Write>(&mut self, writer: &mut W) -> Result<TickOutcome> {
        let now = self.clock.now();
        let mut ledger = match self.store.load() {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load ledger");
                return Ok(TickOutcome::LoadFailed);
            }
        };

        let before = ledger.clone();
        ledger.catch_up(&now);
        if ledger != before {
            if let Err(e) = self.store.save(&ledger) {
                tracing::warn!(error = %e, "failed to save normalized ledger");
            }
        }

        self.announce_milestones(ledger.today_summary(&now).work_minutes);

        if ledger.active_session.is_none() {
            return Ok(TickOutcome::NoSession);
        }

        let idle = self.detector.idle().context("idle check unsupported")?;
        let threshold = Duration::from_secs(self.settings.idle_minutes.unsigned_abs() * 60);
        if idle < threshold {
            tracing::debug!(idle_secs = idle.as_secs(), "user active");
            return Ok(TickOutcome::Active);
        }

        let minutes = match ledger.stop_session(&now) {
            Ok(minutes) => minutes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to stop idle session");
                return Ok(TickOutcome::StopFailed);
            }
        };
        if let Err(e) = self.store.save(&ledger) {
            tracing::warn!(error = %e, "failed to save after auto-pause");
            return Ok(TickOutcome::StopFailed);
        }

        let idle_text = human_minutes(self.settings.idle_minutes);
        tracing::info!(minutes, "session auto-paused");
        self.notifier
            .notify(TITLE, &format!("Auto-paused after {idle_text} idle"));
        writeln!(writer, "Auto-paused session after {idle_text} idle")?;
        Ok(TickOutcome::AutoPaused { minutes })
    }

    fn announce_milestones(&mut self, work_minutes: i64) {
        if let Some(previous) = self.last_work {
            for milestone in self.milestones.crossed(previous, work_minutes) {
                self.notifier.notify(
                    TITLE,
                    &format!(
                        "Milestone reached: {} ({})",
                        human_minutes(milestone.minutes),
                        milestone.payload
                    ),
                );
            }
        }
        self.last_work = Some(work_minutes);
    }
}
