//! CLI subcommand implementations.
//!
//! Every command runs one cycle: load the ledger, fold any day boundaries
//! crossed since the last run, apply the command, and save if anything
//! changed.

pub mod breaks;
pub mod history;
pub mod settings;
pub mod sprint;
pub mod start;
pub mod status;
pub mod stop;
pub mod today;
pub mod util;
pub mod watch;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use daily_core::Ledger;
use daily_store::Store;

/// A ledger loaded for one command, saved on [`Cycle::finish`] if modified.
pub struct Cycle<'a> {
    store: &'a Store,
    ledger: Ledger,
    dirty: bool,
}

impl<'a> Cycle<'a> {
    /// Loads the ledger and normalizes it against `now`.
    pub fn begin<Tz: TimeZone>(store: &'a Store, now: &DateTime<Tz>) -> Result<Self> {
        let mut ledger = store
            .load()
            .with_context(|| format!("failed to load {}", store.path().display()))?;
        let before = ledger.clone();
        let closed = ledger.catch_up(now);
        if !closed.is_empty() {
            tracing::info!(spans = closed.len(), "closed spans at day boundary");
        }
        let dirty = ledger != before;
        Ok(Self {
            store,
            ledger,
            dirty,
        })
    }

    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Mutable access; the ledger will be saved on finish.
    pub const fn ledger_mut(&mut self) -> &mut Ledger {
        self.dirty = true;
        &mut self.ledger
    }

    /// Saves the ledger if it changed.
    pub fn finish(self) -> Result<Ledger> {
        if self.dirty {
            self.store
                .save(&self.ledger)
                .with_context(|| format!("failed to save {}", self.store.path().display()))?;
        }
        Ok(self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;

    fn at(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 6, day, h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_read_only_cycle_does_not_rewrite_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        store.save(&Ledger::default()).unwrap();
        std::fs::write(store.path(), "{\"days\": {}}").unwrap();

        Cycle::begin(&store, &at(2, 9, 0)).unwrap().finish().unwrap();

        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "{\"days\": {}}"
        );
    }

    #[test]
    fn test_crossing_midnight_is_persisted_without_other_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        let mut ledger = Ledger::default();
        ledger.start_session(&at(1, 23, 0), Vec::new(), "").unwrap();
        store.save(&ledger).unwrap();

        Cycle::begin(&store, &at(2, 1, 0)).unwrap().finish().unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.active_session.unwrap().start, at(2, 0, 0));
        assert_eq!(saved.days.len(), 1);
    }
}
