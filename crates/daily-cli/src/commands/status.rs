//! Status command.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use daily_core::{Ledger, Milestones, NextTarget, goal_percent, human_minutes, progress_bar};
use daily_store::Store;
use serde::Serialize;

use super::Cycle;
use super::util::clock_time;

/// Machine-readable status, emitted by `status --json`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub date: NaiveDate,
    pub work_minutes: i64,
    pub active_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<i64>,
    pub goal_minutes: i64,
    pub break_interval_minutes: i64,
    pub goal_percent: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextReport>,
}

#[derive(Debug, Serialize)]
pub struct NextReport {
    pub minutes: i64,
    pub name: String,
    pub remaining: i64,
}

impl StatusReport {
    fn build<Tz: TimeZone>(
        ledger: &Ledger,
        milestones: &Milestones<String>,
        now: &DateTime<Tz>,
    ) -> Self {
        let summary = ledger.today_summary(now);
        let work = summary.work_minutes;
        let next = milestones
            .next(work, ledger.goal_minutes)
            .map(|next| NextReport {
                minutes: next.minutes,
                name: match next.target {
                    NextTarget::Threshold(m) => m.payload.clone(),
                    NextTarget::Goal => "goal".to_string(),
                },
                remaining: next.remaining(work),
            });
        Self {
            date: now.date_naive(),
            work_minutes: work,
            active_minutes: summary.active_minutes,
            running_since: ledger
                .active_session
                .as_ref()
                .map(|span| span.start.to_rfc3339()),
            break_minutes: ledger.break_minutes(now),
            goal_minutes: ledger.goal_minutes,
            break_interval_minutes: ledger.break_interval_minutes,
            goal_percent: goal_percent(work, ledger.goal_minutes),
            tier: milestones.current(work).map(|m| m.payload.clone()),
            next,
        }
    }
}

pub fn run<W, Tz>(
    writer: &mut W,
    store: &Store,
    milestones: &Milestones<String>,
    now: &DateTime<Tz>,
    json: bool,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let ledger = Cycle::begin(store, now)?.finish()?;
    let report = StatusReport::build(&ledger, milestones, now);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    write!(writer, "Today: {} logged", human_minutes(report.work_minutes))?;
    if report.active_minutes > 0 {
        write!(writer, " (active {})", human_minutes(report.active_minutes))?;
    }
    writeln!(writer)?;

    let tz = now.timezone();
    if let Some(active) = &ledger.active_session {
        writeln!(writer, "Running since {}", clock_time(&active.start, &tz))?;
    }
    if let Some(minutes) = report.break_minutes {
        writeln!(writer, "On break for {}", human_minutes(minutes))?;
    }
    writeln!(
        writer,
        "Goal: {} | Break interval: {}",
        human_minutes(report.goal_minutes),
        human_minutes(report.break_interval_minutes)
    )?;
    writeln!(
        writer,
        "Progress: {} {}% of goal",
        progress_bar(report.work_minutes, report.goal_minutes),
        report.goal_percent
    )?;

    if let Some(tier) = &report.tier {
        write!(writer, "Tier: {tier}")?;
    } else {
        write!(writer, "Tier: none")?;
    }
    match &report.next {
        Some(next) => {
            write!(
                writer,
                " | Next: {} in {}",
                next.name,
                human_minutes(next.remaining)
            )?;
            // Only a running session moves toward the next milestone.
            if ledger.active_session.is_some() {
                let eta = now.clone() + Duration::minutes(next.remaining);
                write!(writer, " (at {})", clock_time(&eta, &tz))?;
            }
            writeln!(writer)?;
        }
        None => writeln!(writer, " | all milestones reached")?,
    }
    Ok(())
}
