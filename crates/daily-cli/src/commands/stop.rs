//! Stop command.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use daily_core::human_minutes;
use daily_store::Store;

use super::Cycle;

pub fn run<W: Write, Tz: TimeZone>(writer: &mut W, store: &Store, now: &DateTime<Tz>) -> Result<()> {
    let mut cycle = Cycle::begin(store, now)?;
    let minutes = cycle.ledger_mut().stop_session(now)?;
    cycle.finish()?;
    tracing::info!(minutes, "session stopped");

    writeln!(writer, "Stopped session. Logged {}.", human_minutes(minutes))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, NaiveDate};
    use daily_core::{Ledger, LedgerError, ValidationError};

    fn at(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, day, h, m, 0)
            .unwrap()
    }

    fn store_with_session(start: DateTime<FixedOffset>) -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        let mut ledger = Ledger::default();
        ledger.start_session(&start, Vec::new(), "").unwrap();
        store.save(&ledger).unwrap();
        (dir, store)
    }

    #[test]
    fn test_stop_logs_elapsed_time() {
        let (_dir, store) = store_with_session(at(2, 9, 0));
        let mut output = Vec::new();

        run(&mut output, &store, &at(2, 10, 30)).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Stopped session. Logged 1h30m.\n"
        );
        let ledger = store.load().unwrap();
        assert!(ledger.active_session.is_none());
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(ledger.days[&day].total_work_minutes, 90);
    }

    #[test]
    fn test_stop_after_midnight_reports_only_todays_part() {
        let (_dir, store) = store_with_session(at(1, 23, 30));
        let mut output = Vec::new();

        run(&mut output, &store, &at(2, 0, 15)).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Stopped session. Logged 15m.\n"
        );
        let ledger = store.load().unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(ledger.days[&yesterday].total_work_minutes, 30);
        assert_eq!(ledger.days[&today].total_work_minutes, 15);
    }

    #[test]
    fn test_stop_without_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));

        let err = run(&mut Vec::new(), &store, &at(2, 9, 0)).unwrap_err();

        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::Validation(ValidationError::NoActiveSession))
        );
    }

    #[test]
    fn test_stop_before_start_is_clock_skew() {
        let (_dir, store) = store_with_session(at(2, 9, 0));

        let err = run(&mut Vec::new(), &store, &at(2, 8, 0)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::ClockSkew { .. })
        ));
        assert!(store.load().unwrap().active_session.is_some());
    }
}
