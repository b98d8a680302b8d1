//! Work-hours tracker CLI library.
//!
//! Argument parsing, configuration and the command implementations behind
//! the `daily` binary.

mod cli;
pub mod clock;
pub mod commands;
mod config;
pub mod idle;
pub mod notify;

pub use cli::{BreakAction, Cli, Commands};
pub use config::Config;
