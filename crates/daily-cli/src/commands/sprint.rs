//! Sprint command: alternating work blocks and breaks.

use std::io::Write;
use std::time::Duration;

use anyhow::{Result, bail};
use daily_store::Store;

use super::Cycle;
use crate::clock::Clock;
use crate::notify::Notifier;

const TITLE: &str = "Daily Sprint";

/// Sprint parameters as given on the command line.
#[derive(Debug, Clone)]
pub struct SprintPlan {
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub cycles: i64,
    pub tags: Vec<String>,
    pub note: String,
}

impl SprintPlan {
    fn validate(&self) -> Result<()> {
        if self.work_minutes <= 0 || self.break_minutes <= 0 || self.cycles <= 0 {
            bail!("work, break, and cycles must be > 0");
        }
        Ok(())
    }
}

/// Runs the sprint, loading and saving the ledger around every transition so
/// other commands see progress while it sleeps.
pub fn run<W, C, N>(
    writer: &mut W,
    store: &Store,
    clock: &C,
    notifier: &N,
    plan: &SprintPlan,
) -> Result<()>
where
    W: Write,
    C: Clock,
    N: Notifier,
{
    plan.validate()?;

    for i in 1..=plan.cycles {
        let now = clock.now();
        let mut cycle = Cycle::begin(store, &now)?;
        cycle
            .ledger_mut()
            .start_session(&now, plan.tags.clone(), plan.note.as_str())?;
        cycle.finish()?;
        tracing::info!(cycle = i, "sprint work block started");
        writeln!(
            writer,
            "Cycle {i}/{}: work {} min",
            plan.cycles, plan.work_minutes
        )?;
        notifier.notify(TITLE, &format!("Cycle {i} work started"));
        clock.sleep(minutes(plan.work_minutes));

        let now = clock.now();
        let mut cycle = Cycle::begin(store, &now)?;
        notifier.notify(TITLE, &format!("Cycle {i} break"));
        cycle.ledger_mut().start_break(&now)?;
        cycle.finish()?;
        clock.sleep(minutes(plan.break_minutes));

        let now = clock.now();
        let mut cycle = Cycle::begin(store, &now)?;
        // The break may have been ended by hand in the meantime.
        if cycle.ledger().active_break.is_some() {
            cycle.ledger_mut().stop_break(&now)?;
        }
        cycle.finish()?;
    }

    notifier.notify(TITLE, "Sprint finished");
    writeln!(writer, "Sprint finished")?;
    Ok(())
}

const fn minutes(n: i64) -> Duration {
    Duration::from_secs(n.unsigned_abs() * 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

    use crate::clock::fake::FakeClock;
    use crate::notify::fake::RecordingNotifier;

    fn start() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 4, 7, 9, 0, 0)
            .unwrap()
    }

    fn plan(cycles: i64) -> SprintPlan {
        SprintPlan {
            work_minutes: 25,
            break_minutes: 5,
            cycles,
            tags: vec!["focus".into()],
            note: String::new(),
        }
    }

    #[test]
    fn test_cycles_log_work_and_breaks() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        let clock = FakeClock::new(start());
        let notifier = RecordingNotifier::default();
        let mut output = Vec::new();

        run(&mut output, &store, &clock, &notifier, &plan(2)).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Cycle 1/2: work 25 min
        Cycle 2/2: work 25 min
        Sprint finished
        ");
        assert_eq!(
            notifier.messages(),
            [
                "Cycle 1 work started",
                "Cycle 1 break",
                "Cycle 2 work started",
                "Cycle 2 break",
                "Sprint finished",
            ]
        );
        assert_eq!(clock.slept.borrow().len(), 4);

        let ledger = store.load().unwrap();
        let log = &ledger.days[&NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()];
        assert_eq!(log.total_work_minutes, 50);
        assert_eq!(log.total_break_minutes, 10);
        assert_eq!(log.break_count, 2);
        assert_eq!(log.sessions[1].tags, ["focus"]);
        assert!(ledger.active_session.is_none());
        assert!(ledger.active_break.is_none());
    }

    #[test]
    fn test_invalid_plan_is_rejected_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        let clock = FakeClock::new(start());
        let notifier = RecordingNotifier::default();

        let err = run(&mut Vec::new(), &store, &clock, &notifier, &plan(0)).unwrap_err();

        assert_eq!(err.to_string(), "work, break, and cycles must be > 0");
        assert!(!store.path().exists());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_running_session_blocks_sprint() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        let mut ledger = daily_core::Ledger::default();
        ledger.start_session(&start(), Vec::new(), "").unwrap();
        store.save(&ledger).unwrap();
        let clock = FakeClock::new(start());

        let result = run(
            &mut Vec::new(),
            &store,
            &clock,
            &RecordingNotifier::default(),
            &plan(1),
        );

        assert!(result.is_err());
        assert!(clock.slept.borrow().is_empty());
    }
}
