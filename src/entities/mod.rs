pub mod history;
pub mod kv_entry;
pub mod reminder;
pub mod task;

pub use history::HistoryEntry;
pub use kv_entry::Entity as KvEntry;
pub use reminder::{Reminder, Tone};
pub use task::{DailyTask, FixedTask, TaskName, TaskRecord};

/// Rejected user input. The mutation is dropped before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Unknown tone '{0}'")]
    UnknownTone(String),

    #[error("A reminder needs a time")]
    MissingTime,
}
