//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use daily_core::milestone::DEFAULT_TIERS;
use daily_core::{Milestone, Milestones};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// A milestone entry as written in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneConfig {
    pub minutes: i64,
    pub name: String,
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the state file.
    pub state_path: PathBuf,
    /// Idle minutes before `watch` stops the running session.
    pub idle_minutes: i64,
    /// Seconds between idle checks in `watch`.
    pub poll_interval_secs: u64,
    /// Work-time milestones, in any order.
    pub milestones: Vec<MilestoneConfig>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("state_path", &self.state_path)
            .field("idle_minutes", &self.idle_minutes)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("milestones", &self.milestones.len())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs_config_path().unwrap_or_else(|| PathBuf::from(".daily"));
        Self {
            state_path: config_dir.join("state.json"),
            idle_minutes: 10,
            poll_interval_secs: 30,
            milestones: DEFAULT_TIERS
                .iter()
                .map(|(minutes, name)| MilestoneConfig {
                    minutes: *minutes,
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DAILY_*)
        figment = figment.merge(Env::prefixed("DAILY_"));

        figment.extract()
    }

    /// The configured milestones as a selection list.
    pub fn milestones(&self) -> Milestones<String> {
        Milestones::new(
            self.milestones
                .iter()
                .map(|m| Milestone {
                    minutes: m.minutes,
                    payload: m.name.clone(),
                })
                .collect(),
        )
    }
}

/// Returns the platform-specific config directory for daily.
///
/// On Linux: `~/.config/daily`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daily"))
}
