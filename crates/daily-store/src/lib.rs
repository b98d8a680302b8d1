//! Storage layer for the daily work tracker.
//!
//! The whole [`Ledger`] lives in one pretty-printed JSON document.
//!
//! # Atomicity
//!
//! [`Store::save`] writes to a temporary file in the destination directory and
//! renames it over the target, so a crash mid-write leaves the previous
//! document untouched.
//!
//! # Concurrency
//!
//! There is no locking. Two processes that load, mutate and save the same
//! file race, and the later save wins. Callers keep each load/save cycle
//! short to make this unlikely.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use daily_core::Ledger;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming the state file failed.
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The state file exists but is not a valid ledger document.
    #[error("state file {} is corrupt", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to the state file at a fixed path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger.
    ///
    /// A missing file is not an error: a default ledger is written and
    /// returned.
    pub fn load(&self) -> Result<Ledger, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file, writing defaults");
                let ledger = Ledger::default();
                self.save(&ledger)?;
                return Ok(ledger);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    action: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut ledger: Ledger =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        ledger.ensure_defaults();
        Ok(ledger)
    }

    /// Writes the ledger atomically, creating the parent directory if needed.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .map_err(|source| self.io_error("create directory for", source))?;

        let mut json = serde_json::to_string_pretty(ledger)
            .map_err(|source| self.io_error("serialize", io::Error::other(source)))?;
        json.push('\n');

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|source| self.io_error("create temp file for", source))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| self.io_error("write", source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error("replace", e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "saved state");
        Ok(())
    }

    fn io_error(&self, action: &'static str, source: io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }
}
