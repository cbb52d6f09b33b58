//! Two-path, best-effort delivery.
//!
//! The remote path hands the reminder to a push service. If that is missing,
//! refused, or fails, the local path waits in-process and rings the terminal.

use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::plan::ScheduledReminder;
use crate::constants::{REMINDER_ALERT_PREFIX, REMINDER_TITLE};
use crate::notify::{Alerter, LocalNotifier, NotifyError, Permission, PushNotifier, PushTicket, TonePlayer};
use crate::utils::Clock;

/// Where a pending reminder currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting on the push service
    Requesting,
    /// Accepted by the push service
    Remote(PushTicket),
    /// Armed as an in-process timer
    LocalTimer,
    /// Delivered locally
    Fired,
    /// Discarded by a rebuild. A push accepted after this point is cancelled.
    Withdrawn,
}

pub(crate) type SharedState = Arc<Mutex<DispatchState>>;

/// Delivery through the push capability.
pub struct RemotePath {
    push: Arc<dyn PushNotifier>,
}

impl RemotePath {
    pub fn new(push: Arc<dyn PushNotifier>) -> Self {
        Self { push }
    }

    pub async fn deliver(&self, reminder: &ScheduledReminder) -> Result<PushTicket, NotifyError> {
        match self.push.request_permission().await? {
            Permission::Granted => self.push.schedule(reminder).await,
            _ => Err(NotifyError::PermissionDenied),
        }
    }

    pub fn notifier(&self) -> Arc<dyn PushNotifier> {
        Arc::clone(&self.push)
    }
}

/// Delivery through an in-process timer.
pub struct LocalPath {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn LocalNotifier>,
    tone: Arc<dyn TonePlayer>,
    alerter: Arc<dyn Alerter>,
}

impl LocalPath {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn LocalNotifier>,
        tone: Arc<dyn TonePlayer>,
        alerter: Arc<dyn Alerter>,
    ) -> Self {
        Self {
            clock,
            notifier,
            tone,
            alerter,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn LocalNotifier> {
        &self.notifier
    }

    /// Sleep until the fire instant, then ring
    pub async fn deliver(&self, reminder: &ScheduledReminder) {
        // Recomputed here: the remote attempt may have taken a while.
        let wait = (reminder.fire_at - self.clock.now()).to_std().unwrap_or_default();
        debug!("Local timer for '{}' in {:?}", reminder.task_name, wait);
        tokio::time::sleep(wait).await;
        self.fire(reminder).await;
    }

    /// Play the tone and show the best available notification
    pub async fn fire(&self, reminder: &ScheduledReminder) {
        self.tone.play(reminder.tone).await;

        if self.notifier.permission() == Permission::Granted {
            match self.notifier.show(REMINDER_TITLE, &reminder.task_name) {
                Ok(()) => return,
                Err(e) => warn!("Local notification failed, falling back to alert: {}", e),
            }
        }
        self.alerter
            .alert(&format!("{}{}", REMINDER_ALERT_PREFIX, reminder.task_name));
    }
}

/// Run the dispatch chain for one reminder, recording progress in `state`.
pub(crate) async fn dispatch(
    reminder: ScheduledReminder,
    remote: Option<Arc<RemotePath>>,
    local: Arc<LocalPath>,
    state: SharedState,
) {
    if let Some(remote) = remote {
        match remote.deliver(&reminder).await {
            Ok(ticket) => {
                if advance(&state, DispatchState::Remote(ticket.clone())) {
                    debug!("Reminder '{}' handed to push service", reminder.task_name);
                } else {
                    debug!("Reminder '{}' withdrawn while scheduling, cancelling push", reminder.task_name);
                    if let Err(e) = remote.notifier().cancel(&ticket).await {
                        warn!("Could not withdraw push for '{}': {}", reminder.task_name, e);
                    }
                }
                return;
            }
            Err(e) => warn!(
                "Push scheduling failed for '{}', using local timer: {}",
                reminder.task_name, e
            ),
        }
    }

    if !advance(&state, DispatchState::LocalTimer) {
        return;
    }
    local.deliver(&reminder).await;
    set_state(&state, DispatchState::Fired);
}

fn lock(state: &SharedState) -> MutexGuard<'_, DispatchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn set_state(state: &SharedState, next: DispatchState) {
    *lock(state) = next;
}

/// Move to `next` unless the reminder was withdrawn. Returns whether it moved.
pub(crate) fn advance(state: &SharedState, next: DispatchState) -> bool {
    let mut current = lock(state);
    if *current == DispatchState::Withdrawn {
        return false;
    }
    *current = next;
    true
}

/// Mark a reminder withdrawn and return the state it was in
pub(crate) fn withdraw(state: &SharedState) -> DispatchState {
    std::mem::replace(&mut *lock(state), DispatchState::Withdrawn)
}

pub(crate) fn read_state(state: &SharedState) -> DispatchState {
    lock(state).clone()
}
