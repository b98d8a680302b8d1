//! Error types for ledger operations.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// A request that is invalid for the current ledger state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A work session is already running.
    #[error("session already running since {}", .since.format("%-I:%M%p"))]
    AlreadyRunning { since: DateTime<FixedOffset> },

    /// A break is already running.
    #[error("break already running since {}", .since.format("%-I:%M%p"))]
    AlreadyOnBreak { since: DateTime<FixedOffset> },

    /// There is no work session to stop.
    #[error("no active session")]
    NoActiveSession,

    /// There is no break to stop.
    #[error("no active break")]
    NoActiveBreak,

    /// A setting that must be positive was zero or negative.
    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: i64 },
}

/// Errors returned by lifecycle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The stop timestamp precedes the span's start.
    #[error("stop time {stop} is before start time {start}")]
    ClockSkew {
        start: DateTime<FixedOffset>,
        stop: DateTime<FixedOffset>,
    },
}
