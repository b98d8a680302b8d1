//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Track your work hours.
///
/// Records work sessions and breaks, rolls them into daily totals and shows
/// progress toward a daily goal.
#[derive(Debug, Parser)]
#[command(name = "daily", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a work session.
    Start {
        /// Tag for the session (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Note for the session.
        #[arg(long, default_value = "")]
        note: String,

        /// When the session started (RFC 3339 or e.g. "15 minutes ago").
        #[arg(long)]
        at: Option<String>,
    },

    /// Stop the current session.
    Stop {
        /// When the session ended (RFC 3339 or e.g. "15 minutes ago").
        #[arg(long)]
        at: Option<String>,
    },

    /// Start or stop a break.
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },

    /// Show today's status.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show today's sessions.
    Today,

    /// Show a summary of recent days.
    History {
        /// Number of days to show.
        #[arg(default_value_t = 7, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        days: usize,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set the daily goal in hours (up to 24) or minutes.
    SetGoal {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Set the break reminder interval in minutes.
    SetBreaks {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Run work/break cycles with notifications.
    Sprint {
        /// Work minutes per cycle.
        #[arg(long, default_value_t = 50)]
        work: i64,

        /// Break minutes per cycle.
        #[arg(long = "break", default_value_t = 10)]
        rest: i64,

        /// Number of cycles.
        #[arg(long, default_value_t = 4)]
        cycles: i64,

        /// Tag for sprint sessions (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Note for sprint sessions.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Stop the active session automatically when the machine goes idle.
    Watch {
        /// Idle minutes before the session is stopped.
        #[arg(long)]
        idle: Option<i64>,

        /// Seconds between idle checks.
        #[arg(long)]
        interval: Option<u64>,
    },
}

/// Break subcommands.
#[derive(Debug, Subcommand)]
pub enum BreakAction {
    /// Start a break, stopping any running session.
    Start {
        /// When the break started.
        #[arg(long)]
        at: Option<String>,
    },
    /// End the current break.
    Stop {
        /// When the break ended.
        #[arg(long)]
        at: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_accepts_repeated_tags() {
        let cli = Cli::try_parse_from([
            "daily", "start", "--tag", "a", "--tag", "b", "--note", "hello",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Start { tags, note, at }) => {
                assert_eq!(tags, ["a", "b"]);
                assert_eq!(note, "hello");
                assert!(at.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_history_defaults_to_seven_days() {
        let cli = Cli::try_parse_from(["daily", "history"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                days: 7,
                json: false
            })
        ));
    }

    #[test]
    fn test_history_rejects_zero_days() {
        assert!(Cli::try_parse_from(["daily", "history", "0"]).is_err());
        let cli = Cli::try_parse_from(["daily", "history", "1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History { days: 1, .. })
        ));
    }

    #[test]
    fn test_sprint_break_flag_maps_to_rest() {
        let cli = Cli::try_parse_from(["daily", "sprint", "--break", "5", "--cycles", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sprint {
                work: 50,
                rest: 5,
                cycles: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_set_goal_accepts_negative_for_validation_later() {
        let cli = Cli::try_parse_from(["daily", "set-goal", "-2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::SetGoal { value: -2 })));
    }
}
