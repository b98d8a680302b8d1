//! Break start/stop commands.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use daily_core::human_minutes;
use daily_store::Store;

use super::Cycle;
use super::util::clock_time;

/// Starts a break, stopping the running session first.
pub fn start<W, Tz>(writer: &mut W, store: &Store, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut cycle = Cycle::begin(store, now)?;
    let stopped = cycle.ledger_mut().start_break(now)?;
    cycle.finish()?;
    tracing::info!(stopped_session = stopped.is_some(), "break started");

    if let Some(minutes) = stopped {
        writeln!(writer, "Stopped session. Logged {}.", human_minutes(minutes))?;
    }
    writeln!(writer, "Break started at {}", clock_time(now, &now.timezone()))?;
    Ok(())
}

pub fn stop<W: Write, Tz: TimeZone>(writer: &mut W, store: &Store, now: &DateTime<Tz>) -> Result<()> {
    let mut cycle = Cycle::begin(store, now)?;
    let minutes = cycle.ledger_mut().stop_break(now)?;
    cycle.finish()?;
    tracing::info!(minutes, "break stopped");

    writeln!(writer, "Break ended. Rested {}.", human_minutes(minutes))?;
    Ok(())
}
