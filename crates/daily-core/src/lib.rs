//! Core time-tracking engine for `daily`.
//!
//! This crate contains:
//! - The session ledger: settings, active spans and per-day logs
//! - Lifecycle operations for work sessions and breaks
//! - Day-boundary normalization for spans running past midnight
//! - Projections: today's totals, history, milestones and formatting
//!
//! Every operation takes the current time as an argument. Nothing here reads
//! the clock or touches the filesystem.

mod aggregate;
mod error;
mod ledger;
mod lifecycle;
pub mod milestone;
mod normalize;
pub mod projection;

pub use error::{LedgerError, ValidationError};
pub use ledger::{
    DEFAULT_BREAK_INTERVAL_MINUTES, DEFAULT_GOAL_MINUTES, DayLog, Ledger, Span,
    parse_goal_minutes,
};
pub use milestone::{Milestone, Milestones, NextMilestone, NextTarget};
pub use normalize::{ClosedSpan, SpanKind};
pub use projection::{TodaySummary, goal_percent, human_minutes, progress_bar};
