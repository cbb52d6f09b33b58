//! Notification capabilities consumed by the reminder scheduler.
//!
//! Each capability is a trait so the scheduler can run against the real
//! terminal/HTTP implementations or against recording fakes. None of them is
//! allowed to fail the caller: errors are returned as [`NotifyError`] and the
//! dispatcher degrades to the next path.

use async_trait::async_trait;

use crate::entities::Tone;
use crate::scheduler::ScheduledReminder;

pub mod push;
pub mod terminal;

pub use push::PushGateway;
pub use terminal::{StdoutAlerter, TerminalBell, TerminalNotifier};

/// Why a notification path could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification capability unavailable: {0}")]
    Unavailable(String),

    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Notification request failed: {0}")]
    Request(String),

    #[error("Notification rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Permission state, mirroring what notification hosts report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Not decided yet
    #[default]
    Default,
    Granted,
    Denied,
}

/// Handle to a notification accepted by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PushTicket(pub String);

/// Remote push capability. Delivery happens on the host even if this process exits.
#[async_trait]
pub trait PushNotifier: Send + Sync {
    /// Ask the host for permission to deliver pushes.
    async fn request_permission(&self) -> Result<Permission, NotifyError> {
        Ok(Permission::Granted)
    }

    /// Schedule a notification at `reminder.fire_at`.
    async fn schedule(&self, reminder: &ScheduledReminder) -> Result<PushTicket, NotifyError>;

    /// Withdraw a previously accepted notification.
    async fn cancel(&self, ticket: &PushTicket) -> Result<(), NotifyError>;
}

/// Local desktop-style notification capability.
pub trait LocalNotifier: Send + Sync {
    fn permission(&self) -> Permission;

    fn request_permission(&self) -> Permission;

    fn show(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Plays one of the enumerated tones.
#[async_trait]
pub trait TonePlayer: Send + Sync {
    async fn play(&self, tone: Tone);
}

/// Last-resort, always-available user-visible message.
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}
