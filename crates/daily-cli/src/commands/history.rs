//! History command.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone};
use daily_core::human_minutes;
use daily_store::Store;
use serde::Serialize;

use super::Cycle;

#[derive(Debug, Serialize)]
struct HistoryEntry {
    date: NaiveDate,
    work_minutes: i64,
    break_minutes: i64,
    break_count: i64,
    goal_minutes: i64,
}

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &Store,
    now: &DateTime<Tz>,
    days: usize,
    json: bool,
) -> Result<()> {
    let ledger = Cycle::begin(store, now)?.finish()?;
    let entries: Vec<HistoryEntry> = ledger
        .history(days)
        .into_iter()
        .map(|log| HistoryEntry {
            date: log.date,
            work_minutes: log.total_work_minutes,
            break_minutes: log.total_break_minutes,
            break_count: log.break_count,
            goal_minutes: log.goal_minutes_snapshot,
        })
        .collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "no history yet")?;
        return Ok(());
    }
    for entry in &entries {
        writeln!(
            writer,
            "{}  work: {}  breaks: {} ({})",
            entry.date,
            human_minutes(entry.work_minutes),
            human_minutes(entry.break_minutes),
            entry.break_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use daily_core::Ledger;

    fn at(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 6, day, h, m, 0)
            .unwrap()
    }

    fn seeded_store(dir: &tempfile::TempDir) -> Store {
        let store = Store::new(dir.path().join("state.json"));
        let mut ledger = Ledger::default();
        for day in 1..=3 {
            ledger.start_session(&at(day, 9, 0), Vec::new(), "").unwrap();
            ledger.stop_session(&at(day, 9 + day, 0)).unwrap();
        }
        ledger.start_break(&at(3, 13, 0)).unwrap();
        ledger.stop_break(&at(3, 13, 20)).unwrap();
        store.save(&ledger).unwrap();
        store
    }

    #[test]
    fn test_newest_first_and_limited() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);
        let mut output = Vec::new();

        run(&mut output, &store, &at(3, 18, 0), 2, false).unwrap();

        insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        2025-06-03  work: 3h  breaks: 20m (1)
        2025-06-02  work: 2h  breaks: 0m (0)
        ");
    }

    #[test]
    fn test_json_lists_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);
        let mut output = Vec::new();

        run(&mut output, &store, &at(3, 18, 0), 7, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["date"], "2025-06-03");
        assert_eq!(entries[0]["break_count"], 1);
        assert_eq!(entries[2]["work_minutes"], 60);
        assert_eq!(entries[2]["goal_minutes"], 720);
    }

    #[test]
    fn test_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        let mut output = Vec::new();

        run(&mut output, &store, &at(1, 9, 0), 7, false).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "no history yet\n");
    }
}
