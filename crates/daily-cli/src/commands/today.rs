//! Today command: the sessions logged so far today.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use daily_core::human_minutes;
use daily_store::Store;

use super::Cycle;
use super::util::clock_time;

pub fn run<W, Tz>(writer: &mut W, store: &Store, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let ledger = Cycle::begin(store, now)?.finish()?;
    let today = now.date_naive();
    let tz = now.timezone();

    writeln!(writer, "Today: {today}")?;
    match ledger.day_log(today).filter(|log| !log.sessions.is_empty()) {
        Some(log) => {
            for (i, span) in log.sessions.iter().enumerate() {
                let end = span.end.unwrap_or(span.start);
                let minutes = end.signed_duration_since(span.start).num_minutes().max(1);
                write!(
                    writer,
                    "  #{} {} -> {} ({})",
                    i + 1,
                    clock_time(&span.start, &tz),
                    clock_time(&end, &tz),
                    human_minutes(minutes)
                )?;
                if !span.tags.is_empty() {
                    write!(writer, " tags:{}", span.tags.join(","))?;
                }
                if !span.note.is_empty() {
                    write!(writer, " note:{}", span.note)?;
                }
                writeln!(writer)?;
            }
            writeln!(writer, "  total: {}", human_minutes(log.total_work_minutes))?;
        }
        None => writeln!(writer, "  no logged sessions yet")?,
    }

    if let Some(active) = &ledger.active_session {
        writeln!(
            writer,
            "  active since {} ({} so far)",
            clock_time(&active.start, &tz),
            human_minutes(active.elapsed_minutes(now))
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use daily_core::Ledger;

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 2, h, m, s)
            .unwrap()
    }

    fn render(ledger: &Ledger, now: &DateTime<FixedOffset>) -> String {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("state.json"));
        store.save(ledger).unwrap();
        let mut output = Vec::new();
        run(&mut output, &store, now).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_lists_sessions_and_active_one() {
        let mut ledger = Ledger::default();
        ledger
            .start_session(&at(9, 0, 0), vec!["client".into()], "kickoff")
            .unwrap();
        ledger.stop_session(&at(9, 50, 0)).unwrap();
        ledger.start_session(&at(10, 0, 0), Vec::new(), "").unwrap();
        ledger.stop_session(&at(10, 0, 20)).unwrap();
        ledger.start_session(&at(13, 0, 0), Vec::new(), "").unwrap();

        insta::assert_snapshot!(render(&ledger, &at(14, 15, 0)), @r"
        Today: 2025-06-02
          #1 9:00AM -> 9:50AM (50m) tags:client note:kickoff
          #2 10:00AM -> 10:00AM (1m)
          total: 50m
          active since 1:00PM (1h15m so far)
        ");
    }

    #[test]
    fn test_empty_day() {
        insta::assert_snapshot!(render(&Ledger::default(), &at(8, 0, 0)), @r"
        Today: 2025-06-02
          no logged sessions yet
        ");
    }
}
