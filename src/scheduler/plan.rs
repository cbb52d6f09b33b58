//! Computing which reminders are due later today.

use chrono::{DateTime, Local};
use log::warn;

use crate::entities::{DailyTask, Tone};
use crate::utils::datetime::local_instant;

/// A reminder resolved to a concrete instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub task_id: String,
    pub task_name: String,
    pub tone: Tone,
    pub fire_at: DateTime<Local>,
}

/// Reminders to arm for `tasks` as of `now`.
///
/// Done tasks, tasks without a reminder, and reminders at or before `now` are
/// skipped. A lapsed reminder is not moved to tomorrow.
pub fn plan_reminders(tasks: &[DailyTask], now: DateTime<Local>) -> Vec<ScheduledReminder> {
    let today = now.date_naive();

    tasks
        .iter()
        .filter(|task| !task.done)
        .filter_map(|task| {
            let reminder = task.reminder?;
            let Some(fire_at) = local_instant(today, reminder.time) else {
                warn!(
                    "Reminder {} for '{}' does not exist today (clock change), skipping",
                    reminder.time_label(),
                    task.name
                );
                return None;
            };
            if fire_at <= now {
                return None;
            }
            Some(ScheduledReminder {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                tone: reminder.tone,
                fire_at,
            })
        })
        .collect()
}
