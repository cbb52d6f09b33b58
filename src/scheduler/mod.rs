//! Reminder scheduler.
//!
//! The pending set is rebuilt from scratch on every change: `reschedule_all`
//! aborts every armed reminder, withdraws any push already accepted, and arms
//! again from the current task list. There is no per-task cancel, so a done,
//! edited or deleted task can never keep a stale timer.

pub mod dispatch;
pub mod plan;

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::entities::DailyTask;
use crate::notify::{Alerter, LocalNotifier, Permission, PushNotifier, PushTicket, TonePlayer};
use crate::utils::Clock;

pub use dispatch::{DispatchState, LocalPath, RemotePath};
pub use plan::{plan_reminders, ScheduledReminder};

use dispatch::{dispatch, read_state, withdraw, SharedState};

/// One armed reminder.
struct PendingReminder {
    reminder: ScheduledReminder,
    state: SharedState,
    handle: JoinHandle<()>,
}

/// Snapshot of an armed reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInfo {
    pub task_id: String,
    pub task_name: String,
    pub fire_at: DateTime<Local>,
    pub state: DispatchState,
}

/// Owner of all armed reminders. Must be used inside a tokio runtime.
pub struct ReminderScheduler {
    clock: Arc<dyn Clock>,
    remote: Option<Arc<RemotePath>>,
    local: Arc<LocalPath>,
    pending: HashMap<String, PendingReminder>,
}

impl ReminderScheduler {
    pub fn new(
        clock: Arc<dyn Clock>,
        push: Option<Arc<dyn PushNotifier>>,
        notifier: Arc<dyn LocalNotifier>,
        tone: Arc<dyn TonePlayer>,
        alerter: Arc<dyn Alerter>,
    ) -> Self {
        let local = Arc::new(LocalPath::new(Arc::clone(&clock), notifier, tone, alerter));
        Self {
            clock,
            remote: push.map(|push| Arc::new(RemotePath::new(push))),
            local,
            pending: HashMap::new(),
        }
    }

    /// Ask for local notification permission if it has not been decided yet
    pub fn request_permissions(&self) -> Permission {
        let notifier = self.local.notifier();
        match notifier.permission() {
            Permission::Default => notifier.request_permission(),
            decided => decided,
        }
    }

    pub fn has_remote_path(&self) -> bool {
        self.remote.is_some()
    }

    /// Discard every armed reminder and arm again from `tasks`.
    ///
    /// Returns how many reminders were armed.
    pub fn reschedule_all(&mut self, tasks: &[DailyTask]) -> usize {
        self.cancel_all();

        let planned = plan_reminders(tasks, self.clock.now());
        for reminder in planned {
            let state: SharedState = Arc::new(Mutex::new(DispatchState::Requesting));
            let handle = tokio::spawn(dispatch(
                reminder.clone(),
                self.remote.clone(),
                Arc::clone(&self.local),
                Arc::clone(&state),
            ));
            debug!(
                "Armed reminder for '{}' at {}",
                reminder.task_name,
                reminder.fire_at.format("%H:%M")
            );
            self.pending.insert(
                reminder.task_id.clone(),
                PendingReminder {
                    reminder,
                    state,
                    handle,
                },
            );
        }

        info!("Rescheduled reminders: {} pending", self.pending.len());
        self.pending.len()
    }

    /// Abort every armed reminder and withdraw accepted pushes.
    ///
    /// A reminder still waiting on the push service is left running in the
    /// withdrawn state so it can cancel the push once the service answers.
    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            match withdraw(&pending.state) {
                DispatchState::Requesting if self.remote.is_some() => {
                    debug!("Withdrawing in-flight push for '{}'", pending.reminder.task_name);
                }
                DispatchState::Remote(ticket) => {
                    pending.handle.abort();
                    if let Some(remote) = &self.remote {
                        cancel_push(remote, ticket, pending.reminder.task_name);
                    }
                }
                _ => pending.handle.abort(),
            }
        }
    }

    /// Reminders still ahead of their fire time, soonest first
    pub fn pending(&self) -> Vec<PendingInfo> {
        let now = self.clock.now();
        let mut infos: Vec<PendingInfo> = self
            .pending
            .values()
            .filter_map(|pending| {
                let state = read_state(&pending.state);
                if !is_live(&state) || pending.reminder.fire_at <= now {
                    return None;
                }
                Some(PendingInfo {
                    task_id: pending.reminder.task_id.clone(),
                    task_name: pending.reminder.task_name.clone(),
                    fire_at: pending.reminder.fire_at,
                    state,
                })
            })
            .collect();
        infos.sort_by(|a, b| a.fire_at.cmp(&b.fire_at));
        infos
    }

    /// Whether a reminder is armed for a task
    pub fn is_pending(&self, task_id: &str) -> bool {
        let now = self.clock.now();
        self.pending
            .get(task_id)
            .is_some_and(|pending| is_live(&read_state(&pending.state)) && pending.reminder.fire_at > now)
    }
}

fn is_live(state: &DispatchState) -> bool {
    !matches!(state, DispatchState::Fired | DispatchState::Withdrawn)
}

// fire-and-forget
fn cancel_push(remote: &RemotePath, ticket: PushTicket, task_name: String) {
    let push = remote.notifier();
    if let Ok(runtime) = tokio::runtime::Handle::try_current() {
        runtime.spawn(async move {
            if let Err(e) = push.cancel(&ticket).await {
                warn!("Could not withdraw push for '{}': {}", task_name, e);
            }
        });
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }
}
