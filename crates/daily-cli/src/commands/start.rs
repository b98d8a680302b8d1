//! Start command.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use daily_store::Store;

use super::Cycle;
use super::util::clock_time;

pub fn run<W, Tz>(
    writer: &mut W,
    store: &Store,
    now: &DateTime<Tz>,
    tags: Vec<String>,
    note: &str,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut cycle = Cycle::begin(store, now)?;
    cycle.ledger_mut().start_session(now, tags.clone(), note)?;
    cycle.finish()?;
    tracing::info!(?tags, "session started");

    write!(
        writer,
        "Started session at {}",
        clock_time(now, &now.timezone())
    )?;
    if !tags.is_empty() {
        write!(writer, " [tags: {}]", tags.join(","))?;
    }
    if !note.is_empty() {
        write!(writer, " note: {note}")?;
    }
    writeln!(writer)?;
    Ok(())
}
