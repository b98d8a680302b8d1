//! System idle-time detection.

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// Reports how long the user has been idle.
pub trait IdleDetector {
    fn idle(&self) -> Result<Duration>;
}

/// Asks the desktop for idle time: `ioreg` on macOS, `xprintidle` on Linux.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdleDetector;

impl IdleDetector for SystemIdleDetector {
    fn idle(&self) -> Result<Duration> {
        if cfg!(target_os = "macos") {
            let output = Command::new("ioreg")
                .args(["-c", "IOHIDSystem"])
                .output()
                .context("failed to run ioreg")?;
            if !output.status.success() {
                bail!("ioreg exited with {}", output.status);
            }
            parse_ioreg(&String::from_utf8_lossy(&output.stdout))
                .context("HIDIdleTime not found in ioreg output")
        } else if cfg!(target_os = "linux") {
            let output = Command::new("xprintidle")
                .output()
                .context("failed to run xprintidle")?;
            if !output.status.success() {
                bail!("xprintidle exited with {}", output.status);
            }
            parse_xprintidle(&String::from_utf8_lossy(&output.stdout))
        } else {
            bail!("idle detection not supported on this platform")
        }
    }
}

/// Extracts `HIDIdleTime` (nanoseconds) from `ioreg -c IOHIDSystem` output.
fn parse_ioreg(output: &str) -> Option<Duration> {
    output
        .lines()
        .filter(|line| line.contains("HIDIdleTime"))
        .find_map(|line| {
            let value = line.split_whitespace().last()?.trim_matches(',');
            value.parse::<u64>().ok().map(Duration::from_nanos)
        })
}

/// Parses `xprintidle` output (milliseconds).
fn parse_xprintidle(output: &str) -> Result<Duration> {
    let ms: u64 = output
        .trim()
        .parse()
        .with_context(|| format!("unexpected xprintidle output: {output:?}"))?;
    Ok(Duration::from_millis(ms))
}
