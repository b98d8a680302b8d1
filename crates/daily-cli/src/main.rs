use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use daily_cli::clock::SystemClock;
use daily_cli::commands::util::parse_when;
use daily_cli::commands::{breaks, history, settings, sprint, start, status, stop, today, watch};
use daily_cli::idle::SystemIdleDetector;
use daily_cli::notify::DesktopNotifier;
use daily_cli::{BreakAction, Cli, Commands, Config};
use daily_store::Store;

/// Resolves an optional `--at` value against the current local time.
fn resolve_when(at: Option<&str>, now: DateTime<Local>) -> Result<DateTime<Local>> {
    match at {
        Some(s) => parse_when(s, &now),
        None => Ok(now),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and dispatches the parsed command.
fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let store = Store::new(config.state_path.clone());
    let mut out = io::stdout().lock();
    let now = Local::now();

    match cli.command {
        Some(Commands::Start { tags, note, at }) => {
            let when = resolve_when(at.as_deref(), now)?;
            start::run(&mut out, &store, &when, tags, &note)?;
        }
        Some(Commands::Stop { at }) => {
            let when = resolve_when(at.as_deref(), now)?;
            stop::run(&mut out, &store, &when)?;
        }
        Some(Commands::Break { action }) => match action {
            BreakAction::Start { at } => {
                let when = resolve_when(at.as_deref(), now)?;
                breaks::start(&mut out, &store, &when)?;
            }
            BreakAction::Stop { at } => {
                let when = resolve_when(at.as_deref(), now)?;
                breaks::stop(&mut out, &store, &when)?;
            }
        },
        Some(Commands::Status { json }) => {
            status::run(&mut out, &store, &config.milestones(), &now, json)?;
        }
        Some(Commands::Today) => today::run(&mut out, &store, &now)?,
        Some(Commands::History { days, json }) => {
            history::run(&mut out, &store, &now, days, json)?;
        }
        Some(Commands::SetGoal { value }) => settings::set_goal(&mut out, &store, &now, value)?,
        Some(Commands::SetBreaks { minutes }) => {
            settings::set_breaks(&mut out, &store, &now, minutes)?;
        }
        Some(Commands::Sprint {
            work,
            rest,
            cycles,
            tags,
            note,
        }) => {
            let plan = sprint::SprintPlan {
                work_minutes: work,
                break_minutes: rest,
                cycles,
                tags,
                note,
            };
            sprint::run(&mut out, &store, &SystemClock, &DesktopNotifier, &plan)?;
        }
        Some(Commands::Watch { idle, interval }) => {
            let settings = watch::WatchSettings {
                idle_minutes: idle.unwrap_or(config.idle_minutes),
                interval: std::time::Duration::from_secs(
                    interval.unwrap_or(config.poll_interval_secs),
                ),
            };
            let milestones = config.milestones();
            let mut watcher = watch::Watcher::new(
                &store,
                &SystemClock,
                &SystemIdleDetector,
                &DesktopNotifier,
                &milestones,
                settings,
            )?;
            watcher.run(&mut out)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
