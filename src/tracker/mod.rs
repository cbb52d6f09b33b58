//! Task model service.
//!
//! [`Tracker`] owns the authoritative fixed list and today's checklist. Every
//! mutation validates first, then changes the in-memory list, then writes the
//! whole list back before returning, so a later read in the same step always
//! sees it.

pub mod derive;
pub mod progress;

use chrono::NaiveDate;
use log::{debug, info};
use std::sync::Arc;

use crate::entities::{DailyTask, FixedTask, HistoryEntry, Reminder, TaskName, TaskRecord, ValidationError};
use crate::storage::{LocalStorage, StoreError};
use crate::utils::datetime::date_key;
use crate::utils::Clock;

pub use derive::derive_from_fixed;
pub use progress::{compute_pct, Progress};

/// Errors surfaced by tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No {list} task matches '{id}'")]
    NotFound { list: &'static str, id: String },

    #[error("'{0}' matches more than one task, use a longer id")]
    AmbiguousId(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// How an edit treats the task's reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderUpdate {
    #[default]
    Keep,
    Clear,
    Set(Reminder),
}

/// Changes applied by `edit_task` / `edit_fixed`.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub name: Option<String>,
    pub reminder: ReminderUpdate,
}

/// Result of copying fixed templates into today's list.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadFixedOutcome {
    NoFixedTasks,
    AllPresent,
    Added(Vec<DailyTask>),
}

/// Result of ending the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDayOutcome {
    NoTasks,
    Saved { pct: u8 },
}

/// Owner of the fixed list and today's checklist.
pub struct Tracker {
    storage: LocalStorage,
    clock: Arc<dyn Clock>,
    date: NaiveDate,
    daily: Vec<DailyTask>,
    fixed: Vec<FixedTask>,
}

impl Tracker {
    /// Load today's list and the fixed list from storage
    pub async fn load(storage: LocalStorage, clock: Arc<dyn Clock>) -> Result<Self, TrackerError> {
        let date = clock.now().date_naive();
        let daily = storage.daily_tasks(date).await?;
        let fixed = storage.fixed_tasks().await?;

        debug!(
            "Loaded {} daily and {} fixed tasks for {}",
            daily.len(),
            fixed.len(),
            date_key(date)
        );

        Ok(Self {
            storage,
            clock,
            date,
            daily,
            fixed,
        })
    }

    /// The calendar date today's list belongs to
    pub fn today_date(&self) -> NaiveDate {
        self.date
    }

    pub fn today(&self) -> &[DailyTask] {
        &self.daily
    }

    pub fn fixed(&self) -> &[FixedTask] {
        &self.fixed
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Whether the local date moved past the one the list was read for
    pub fn is_stale(&self) -> bool {
        self.clock.now().date_naive() != self.date
    }

    /// Re-read both lists from storage.
    ///
    /// Picks up a date rollover and edits made by another process. Returns
    /// `true` when anything differs from what was held in memory.
    pub async fn reload(&mut self) -> Result<bool, TrackerError> {
        let date = self.clock.now().date_naive();
        let daily = self.storage.daily_tasks(date).await?;
        let fixed = self.storage.fixed_tasks().await?;

        let changed = date != self.date || daily != self.daily || fixed != self.fixed;
        if date != self.date {
            info!("Day changed from {} to {}", date_key(self.date), date_key(date));
        }

        self.date = date;
        self.daily = daily;
        self.fixed = fixed;
        Ok(changed)
    }

    // Daily list

    pub async fn add_task(&mut self, name: &str, reminder: Option<Reminder>) -> Result<DailyTask, TrackerError> {
        let task = DailyTask::new(TaskName::parse(name)?, reminder);
        self.daily.push(task.clone());
        self.save_daily().await?;
        info!("Added daily task '{}'", task.name);
        Ok(task)
    }

    pub async fn edit_task(&mut self, id: &str, edit: TaskEdit) -> Result<DailyTask, TrackerError> {
        let name = edit.name.as_deref().map(TaskName::parse).transpose()?;
        let index = resolve(&self.daily, id, "daily")?;

        let task = &mut self.daily[index];
        if let Some(name) = name {
            task.name = name.into_inner();
        }
        apply_reminder(&mut task.reminder, edit.reminder);
        let updated = task.clone();

        self.save_daily().await?;
        info!("Edited daily task '{}'", updated.name);
        Ok(updated)
    }

    /// Flip a task between done and not done
    pub async fn toggle_done(&mut self, id: &str) -> Result<DailyTask, TrackerError> {
        let index = resolve(&self.daily, id, "daily")?;
        let done = !self.daily[index].done;
        self.set_done_at(index, done).await
    }

    pub async fn set_done(&mut self, id: &str, done: bool) -> Result<DailyTask, TrackerError> {
        let index = resolve(&self.daily, id, "daily")?;
        self.set_done_at(index, done).await
    }

    async fn set_done_at(&mut self, index: usize, done: bool) -> Result<DailyTask, TrackerError> {
        self.daily[index].done = done;
        let updated = self.daily[index].clone();
        self.save_daily().await?;
        debug!("Task '{}' done={}", updated.name, done);
        Ok(updated)
    }

    pub async fn delete_task(&mut self, id: &str) -> Result<DailyTask, TrackerError> {
        let index = resolve(&self.daily, id, "daily")?;
        let removed = self.daily.remove(index);
        self.save_daily().await?;
        info!("Deleted daily task '{}'", removed.name);
        Ok(removed)
    }

    /// Append today's copies of fixed tasks not yet on the list
    pub async fn load_fixed(&mut self) -> Result<LoadFixedOutcome, TrackerError> {
        // The stored list is the source of truth for templates.
        self.fixed = self.storage.fixed_tasks().await?;
        if self.fixed.is_empty() {
            return Ok(LoadFixedOutcome::NoFixedTasks);
        }

        let added = derive_from_fixed(&self.fixed, &self.daily);
        if added.is_empty() {
            return Ok(LoadFixedOutcome::AllPresent);
        }

        self.daily.extend(added.iter().cloned());
        self.save_daily().await?;
        info!("Loaded {} fixed task(s) into {}", added.len(), date_key(self.date));
        Ok(LoadFixedOutcome::Added(added))
    }

    // Fixed list

    pub async fn add_fixed(&mut self, name: &str, reminder: Option<Reminder>) -> Result<FixedTask, TrackerError> {
        let task = FixedTask::new(TaskName::parse(name)?, reminder);
        self.fixed.push(task.clone());
        self.save_fixed().await?;
        info!("Added fixed task '{}'", task.name);
        Ok(task)
    }

    pub async fn edit_fixed(&mut self, id: &str, edit: TaskEdit) -> Result<FixedTask, TrackerError> {
        let name = edit.name.as_deref().map(TaskName::parse).transpose()?;
        let index = resolve(&self.fixed, id, "fixed")?;

        let task = &mut self.fixed[index];
        if let Some(name) = name {
            task.name = name.into_inner();
        }
        apply_reminder(&mut task.reminder, edit.reminder);
        let updated = task.clone();

        self.save_fixed().await?;
        info!("Edited fixed task '{}'", updated.name);
        Ok(updated)
    }

    pub async fn delete_fixed(&mut self, id: &str) -> Result<FixedTask, TrackerError> {
        let index = resolve(&self.fixed, id, "fixed")?;
        let removed = self.fixed.remove(index);
        self.save_fixed().await?;
        info!("Deleted fixed task '{}'", removed.name);
        Ok(removed)
    }

    // Completion and history

    pub fn progress(&self) -> Progress {
        Progress::of(&self.daily)
    }

    /// Record today's completion percentage, overwriting any earlier record
    pub async fn end_day(&mut self) -> Result<EndDayOutcome, TrackerError> {
        if self.daily.is_empty() {
            return Ok(EndDayOutcome::NoTasks);
        }

        let pct = compute_pct(&self.daily);
        self.storage.save_history_entry(self.date, pct).await?;
        info!("Recorded {}% for {}", pct, date_key(self.date));
        Ok(EndDayOutcome::Saved { pct })
    }

    /// Recorded days, most recent first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, TrackerError> {
        Ok(self.storage.history().await?)
    }

    async fn save_daily(&self) -> Result<(), StoreError> {
        self.storage.save_daily_tasks(self.date, &self.daily).await
    }

    async fn save_fixed(&self) -> Result<(), StoreError> {
        self.storage.save_fixed_tasks(&self.fixed).await
    }
}

fn apply_reminder(slot: &mut Option<Reminder>, update: ReminderUpdate) {
    match update {
        ReminderUpdate::Keep => {}
        ReminderUpdate::Clear => *slot = None,
        ReminderUpdate::Set(reminder) => *slot = Some(reminder),
    }
}

/// Find a task by full id or by a unique id prefix
pub fn resolve<T: TaskRecord>(tasks: &[T], id: &str, list: &'static str) -> Result<usize, TrackerError> {
    let id = id.trim();
    let not_found = || TrackerError::NotFound {
        list,
        id: id.to_string(),
    };
    if id.is_empty() {
        return Err(not_found());
    }

    if let Some(index) = tasks.iter().position(|task| task.id() == id) {
        return Ok(index);
    }

    let mut matches = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.id().starts_with(id))
        .map(|(index, _)| index);

    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (Some(_), Some(_)) => Err(TrackerError::AmbiguousId(id.to_string())),
        (None, _) => Err(not_found()),
    }
}
