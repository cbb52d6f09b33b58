//! Command-line surface.

pub mod commands;
pub mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::{ERROR_COMMAND_FAILED, ERROR_VALIDATION};
use crate::logger::Logger;
use crate::session::Session;
use crate::storage::LocalStorage;
use crate::tracker::{Tracker, TrackerError};
use crate::utils::{Clock, SystemClock};

pub use commands::{execute, FixedAction, Outcome, ReminderArgs, TaskCommand};

/// Daily routine tracker with reminders
#[derive(Debug, Parser)]
#[command(name = "routinely", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default lookup
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Task(TaskCommand),
    /// Start an interactive session that keeps reminders armed
    Run,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Where to write it (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Turn a tracker error into the message shown to the user
pub fn describe_error(error: &TrackerError) -> String {
    match error {
        TrackerError::Validation(e) => format!("{}: {}", ERROR_VALIDATION, e),
        other => format!("{}: {}", ERROR_COMMAND_FAILED, other),
    }
}

/// Entry point behind `main`
pub async fn run(cli: Cli) -> Result<()> {
    if let Some(Command::Config {
        action: ConfigAction::Init { path },
    }) = &cli.command
    {
        let path = match path {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    Logger::from_config(&config)?.install()?;

    let db_path = config.database_path()?;
    let storage = LocalStorage::open(&db_path)
        .await
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    info!("Using database {}", db_path.display());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut tracker = Tracker::load(storage, clock).await?;
    let default_tone = config.reminders.default_tone();

    match cli.command.unwrap_or(Command::Task(TaskCommand::Today)) {
        Command::Run => Session::from_config(tracker, &config).run_stdin().await,
        Command::Task(command) => match execute(&mut tracker, command, default_tone).await {
            Ok(outcome) => {
                println!("{}", outcome.output);
                Ok(())
            }
            Err(e @ TrackerError::Storage(_)) => Err(e.into()),
            Err(e) => anyhow::bail!(describe_error(&e)),
        },
        Command::Config { .. } => Ok(()),
    }
}
