//! Task commands shared by the one-shot CLI and the interactive session.

use clap::Subcommand;

use super::render;
use crate::constants::{
    INFO_ALL_FIXED_PRESENT, INFO_NO_FIXED_TASKS, INFO_NO_TASKS_TO_SAVE, SUCCESS_DAY_SAVED, SUCCESS_FIXED_CREATED,
    SUCCESS_FIXED_DELETED, SUCCESS_FIXED_LOADED, SUCCESS_FIXED_UPDATED, SUCCESS_TASK_COMPLETED, SUCCESS_TASK_CREATED,
    SUCCESS_TASK_DELETED, SUCCESS_TASK_REOPENED, SUCCESS_TASK_UPDATED,
};
use crate::entities::{Reminder, Tone, ValidationError};
use crate::tracker::{self, EndDayOutcome, LoadFixedOutcome, ReminderUpdate, TaskEdit, Tracker, TrackerError};

/// Commands operating on the task lists.
#[derive(Debug, Clone, Subcommand)]
pub enum TaskCommand {
    /// Show today's checklist and completion
    Today,
    /// Add a task to today's checklist
    Add {
        /// Task name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        #[command(flatten)]
        reminder: ReminderArgs,
    },
    /// Edit a task on today's checklist
    Edit {
        /// Task id or unique id prefix
        id: String,
        /// New name (keeps the current one if omitted)
        name: Vec<String>,
        #[command(flatten)]
        reminder: ReminderArgs,
        /// Remove the reminder
        #[arg(long, conflicts_with_all = ["at", "tone"])]
        no_reminder: bool,
    },
    /// Mark a task done, or not done again
    Toggle {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete a task from today's checklist
    Delete {
        /// Task id or unique id prefix
        id: String,
    },
    /// Copy fixed tasks missing from today's checklist
    LoadFixed,
    /// Manage fixed (recurring) tasks
    Fixed {
        #[command(subcommand)]
        action: FixedAction,
    },
    /// Record today's completion percentage
    EndDay,
    /// Show recorded completion history
    History {
        /// Show only the most recent entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List available reminder tones
    Tones,
}

/// Fixed list commands.
#[derive(Debug, Clone, Subcommand)]
pub enum FixedAction {
    /// List fixed tasks
    List,
    /// Add a fixed task
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        #[command(flatten)]
        reminder: ReminderArgs,
    },
    /// Edit a fixed task
    Edit {
        id: String,
        name: Vec<String>,
        #[command(flatten)]
        reminder: ReminderArgs,
        #[arg(long, conflicts_with_all = ["at", "tone"])]
        no_reminder: bool,
    },
    /// Delete a fixed task
    Delete { id: String },
}

/// Reminder flags.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReminderArgs {
    /// Reminder time, 24-hour HH:MM
    #[arg(long)]
    pub at: Option<String>,
    /// Reminder tone
    #[arg(long)]
    pub tone: Option<String>,
}

impl ReminderArgs {
    /// Reminder for a new task
    pub fn for_new(&self, default_tone: Tone) -> Result<Option<Reminder>, ValidationError> {
        match (&self.at, &self.tone) {
            (None, None) => Ok(None),
            (None, Some(_)) => Err(ValidationError::MissingTime),
            (Some(at), tone) => Reminder::parse(at, tone.as_deref(), default_tone).map(Some),
        }
    }

    /// Reminder change for an existing task holding `current`
    pub fn for_edit(
        &self,
        current: Option<Reminder>,
        clear: bool,
        default_tone: Tone,
    ) -> Result<ReminderUpdate, ValidationError> {
        if clear {
            return Ok(ReminderUpdate::Clear);
        }
        match (&self.at, &self.tone, current) {
            (None, None, _) => Ok(ReminderUpdate::Keep),
            (Some(at), tone, current) => {
                let fallback = current.map(|reminder| reminder.tone).unwrap_or(default_tone);
                Reminder::parse(at, tone.as_deref(), fallback).map(ReminderUpdate::Set)
            }
            (None, Some(tone), Some(current)) => Ok(ReminderUpdate::Set(Reminder::new(current.time, tone.parse()?))),
            (None, Some(_), None) => Err(ValidationError::MissingTime),
        }
    }
}

/// What a command printed and whether the reminder set must be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub reschedule: bool,
}

impl Outcome {
    fn show(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            reschedule: false,
        }
    }

    fn changed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            reschedule: true,
        }
    }
}

fn joined_name(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Run one task command against the tracker
pub async fn execute(tracker: &mut Tracker, command: TaskCommand, default_tone: Tone) -> Result<Outcome, TrackerError> {
    match command {
        TaskCommand::Today => Ok(Outcome::show(format!(
            "{}\n\n{}",
            render::dashboard(tracker.today_date(), tracker.progress()),
            render::daily_list(tracker.today())
        ))),
        TaskCommand::Add { name, reminder } => {
            let reminder = reminder.for_new(default_tone)?;
            let task = tracker.add_task(&name.join(" "), reminder).await?;
            Ok(Outcome::changed(format!("{}: {}", SUCCESS_TASK_CREATED, render::daily_line(&task))))
        }
        TaskCommand::Edit {
            id,
            name,
            reminder,
            no_reminder,
        } => {
            let index = tracker::resolve(tracker.today(), &id, "daily")?;
            let current = tracker.today()[index].reminder;
            let edit = TaskEdit {
                name: joined_name(&name),
                reminder: reminder.for_edit(current, no_reminder, default_tone)?,
            };
            let task_id = tracker.today()[index].id.clone();
            let task = tracker.edit_task(&task_id, edit).await?;
            Ok(Outcome::changed(format!("{}: {}", SUCCESS_TASK_UPDATED, render::daily_line(&task))))
        }
        TaskCommand::Toggle { id } => {
            let task = tracker.toggle_done(&id).await?;
            let message = if task.done {
                SUCCESS_TASK_COMPLETED
            } else {
                SUCCESS_TASK_REOPENED
            };
            Ok(Outcome::changed(format!(
                "{}: {}\n{}% complete",
                message,
                task.name,
                tracker.progress().pct
            )))
        }
        TaskCommand::Delete { id } => {
            let task = tracker.delete_task(&id).await?;
            Ok(Outcome::changed(format!("{}: {}", SUCCESS_TASK_DELETED, task.name)))
        }
        TaskCommand::LoadFixed => match tracker.load_fixed().await? {
            LoadFixedOutcome::NoFixedTasks => Ok(Outcome::show(INFO_NO_FIXED_TASKS)),
            LoadFixedOutcome::AllPresent => Ok(Outcome::show(INFO_ALL_FIXED_PRESENT)),
            LoadFixedOutcome::Added(added) => Ok(Outcome::changed(format!(
                "{} ({})\n{}",
                SUCCESS_FIXED_LOADED,
                added.len(),
                render::daily_list(tracker.today())
            ))),
        },
        TaskCommand::Fixed { action } => execute_fixed(tracker, action, default_tone).await,
        TaskCommand::EndDay => match tracker.end_day().await? {
            EndDayOutcome::NoTasks => Ok(Outcome::show(INFO_NO_TASKS_TO_SAVE)),
            EndDayOutcome::Saved { pct } => Ok(Outcome::show(format!(
                "{} {}% completion recorded.",
                SUCCESS_DAY_SAVED, pct
            ))),
        },
        TaskCommand::History { limit } => {
            let mut entries = tracker.history().await?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            Ok(Outcome::show(render::history(&entries)))
        }
        TaskCommand::Tones => Ok(Outcome::show(render::tones(default_tone))),
    }
}

async fn execute_fixed(tracker: &mut Tracker, action: FixedAction, default_tone: Tone) -> Result<Outcome, TrackerError> {
    match action {
        FixedAction::List => Ok(Outcome::show(render::fixed_list(tracker.fixed()))),
        FixedAction::Add { name, reminder } => {
            let reminder = reminder.for_new(default_tone)?;
            let task = tracker.add_fixed(&name.join(" "), reminder).await?;
            Ok(Outcome::changed(format!("{}: {}", SUCCESS_FIXED_CREATED, render::fixed_line(&task))))
        }
        FixedAction::Edit {
            id,
            name,
            reminder,
            no_reminder,
        } => {
            let index = tracker::resolve(tracker.fixed(), &id, "fixed")?;
            let current = tracker.fixed()[index].reminder;
            let edit = TaskEdit {
                name: joined_name(&name),
                reminder: reminder.for_edit(current, no_reminder, default_tone)?,
            };
            let task_id = tracker.fixed()[index].id.clone();
            let task = tracker.edit_fixed(&task_id, edit).await?;
            Ok(Outcome::changed(format!("{}: {}", SUCCESS_FIXED_UPDATED, render::fixed_line(&task))))
        }
        FixedAction::Delete { id } => {
            let task = tracker.delete_fixed(&id).await?;
            Ok(Outcome::changed(format!("{}: {}", SUCCESS_FIXED_DELETED, task.name)))
        }
    }
}
