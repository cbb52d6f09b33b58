//! Logging setup.
//!
//! Code logs through the `log` macros; this module builds the `fern` dispatch
//! that routes them. With file logging enabled, records at the configured level
//! go to the log file. Otherwise only warnings and errors reach stderr, which
//! keeps the interactive session readable.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Config;

/// Resolved logging setup
#[derive(Debug, Clone)]
pub struct Logger {
    enabled: bool,
    level: LevelFilter,
    file: Option<PathBuf>,
}

impl Logger {
    /// Resolve the logging setup from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let level = LevelFilter::from_str(&config.logging.level)
            .with_context(|| format!("Invalid logging level '{}'", config.logging.level))?;

        let file = if config.logging.enabled {
            Some(config.log_file_path()?)
        } else {
            None
        };

        Ok(Self {
            enabled: config.logging.enabled,
            level,
            file,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Level applied to records
    pub fn level(&self) -> LevelFilter {
        if self.enabled {
            self.level
        } else {
            self.level.min(LevelFilter::Warn)
        }
    }

    pub fn has_file_writer(&self) -> bool {
        self.file.is_some()
    }

    pub fn log_file_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Build the dispatch without installing it
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let base = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level())
            // sqlx statement logging is noise for a key/value table
            .level_for("sqlx", LevelFilter::Warn)
            .level_for("sea_orm", LevelFilter::Warn);

        match &self.file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
                    }
                }
                let file = fern::log_file(path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                Ok(base.chain(file))
            }
            None => Ok(base.chain(std::io::stderr())),
        }
    }

    /// Install as the global logger. Only the first call in a process succeeds.
    pub fn install(&self) -> Result<()> {
        self.dispatch()?
            .apply()
            .context("A global logger is already installed")?;
        Ok(())
    }
}
