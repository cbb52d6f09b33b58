//! Shared fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use routinely::entities::{DailyTask, Reminder, TaskName, Tone};
use routinely::notify::{Alerter, LocalNotifier, NotifyError, Permission, PushNotifier, PushTicket, TonePlayer};
use routinely::scheduler::{ReminderScheduler, ScheduledReminder};
use routinely::storage::LocalStorage;
use routinely::utils::FixedClock;

/// A local time on a mid-June day, away from any DST transition
pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 6, 15, hour, minute, 0)
        .earliest()
        .expect("valid local time")
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn task(name: &str, reminder: Option<(u32, u32, Tone)>) -> DailyTask {
    DailyTask::new(
        TaskName::parse(name).expect("valid name"),
        reminder.map(|(h, m, tone)| Reminder::new(time(h, m), tone)),
    )
}

pub async fn temp_storage() -> (TempDir, LocalStorage) {
    let dir = TempDir::new().expect("temp dir");
    let storage = LocalStorage::open(&dir.path().join("routinely.db"))
        .await
        .expect("open storage");
    (dir, storage)
}

#[derive(Default)]
pub struct RecordingTone {
    pub played: Mutex<Vec<Tone>>,
}

#[async_trait]
impl TonePlayer for RecordingTone {
    async fn play(&self, tone: Tone) {
        self.played.lock().unwrap().push(tone);
    }
}

#[derive(Default)]
pub struct RecordingAlerter {
    pub alerts: Mutex<Vec<String>>,
}

impl Alerter for RecordingAlerter {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub struct RecordingNotifier {
    pub permission: Mutex<Permission>,
    pub grant_on_request: bool,
    pub shown: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new(grant_on_request: bool) -> Self {
        Self {
            permission: Mutex::new(Permission::Default),
            grant_on_request,
            shown: Mutex::new(Vec::new()),
        }
    }
}

impl LocalNotifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&self) -> Permission {
        let decided = if self.grant_on_request {
            Permission::Granted
        } else {
            Permission::Denied
        };
        *self.permission.lock().unwrap() = decided;
        decided
    }

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if self.permission() != Permission::Granted {
            return Err(NotifyError::PermissionDenied);
        }
        self.shown.lock().unwrap().push((title.to_string(), body.to_string()));
        Ok(())
    }
}

/// Push capability that either accepts everything or fails everything,
/// optionally after a delay.
pub struct FakePush {
    pub accept: bool,
    pub delay: Option<std::time::Duration>,
    pub scheduled: Mutex<Vec<ScheduledReminder>>,
    pub cancelled: Mutex<Vec<PushTicket>>,
    counter: AtomicUsize,
}

impl FakePush {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            delay: None,
            scheduled: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl PushNotifier for FakePush {
    async fn schedule(&self, reminder: &ScheduledReminder) -> Result<PushTicket, NotifyError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if !self.accept {
            return Err(NotifyError::Unavailable("offline".to_string()));
        }
        self.scheduled.lock().unwrap().push(reminder.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(PushTicket(format!("ticket-{}", n)))
    }

    async fn cancel(&self, ticket: &PushTicket) -> Result<(), NotifyError> {
        self.cancelled.lock().unwrap().push(ticket.clone());
        Ok(())
    }
}

/// Scheduler wired to recording fakes.
pub struct Harness {
    pub clock: FixedClock,
    pub tone: Arc<RecordingTone>,
    pub alerter: Arc<RecordingAlerter>,
    pub notifier: Arc<RecordingNotifier>,
    pub push: Option<Arc<FakePush>>,
}

impl Harness {
    pub fn new(now: DateTime<Local>, grant_notifications: bool, push: Option<FakePush>) -> Self {
        Self {
            clock: FixedClock::new(now),
            tone: Arc::new(RecordingTone::default()),
            alerter: Arc::new(RecordingAlerter::default()),
            notifier: Arc::new(RecordingNotifier::new(grant_notifications)),
            push: push.map(Arc::new),
        }
    }

    pub fn scheduler(&self) -> ReminderScheduler {
        ReminderScheduler::new(
            Arc::new(self.clock.clone()),
            self.push.clone().map(|push| push as Arc<dyn PushNotifier>),
            self.notifier.clone(),
            self.tone.clone(),
            self.alerter.clone(),
        )
    }
}

/// Let spawned tasks make progress
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
