//! Goal and break-interval settings.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use daily_core::{human_minutes, parse_goal_minutes};
use daily_store::Store;

use super::Cycle;

/// Sets the daily goal. Values up to 24 are read as hours.
pub fn set_goal<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &Store,
    now: &DateTime<Tz>,
    value: i64,
) -> Result<()> {
    let minutes = parse_goal_minutes(value)?;
    let mut cycle = Cycle::begin(store, now)?;
    cycle.ledger_mut().set_goal_minutes(minutes)?;
    cycle.finish()?;
    tracing::info!(minutes, "goal updated");

    writeln!(writer, "Daily goal set to {}", human_minutes(minutes))?;
    Ok(())
}

pub fn set_breaks<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &Store,
    now: &DateTime<Tz>,
    minutes: i64,
) -> Result<()> {
    let mut cycle = Cycle::begin(store, now)?;
    cycle.ledger_mut().set_break_interval_minutes(minutes)?;
    cycle.finish()?;
    tracing::info!(minutes, "break interval updated");

    writeln!(writer, "Break reminder set to every {}", human_minutes(minutes))?;
    Ok(())
}
