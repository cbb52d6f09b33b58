use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reminder::{deserialize_lenient, Reminder};
use super::ValidationError;

/// Generate a fresh opaque task id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// A trimmed, non-empty task name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskName(String);

impl TaskName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A recurring task template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedTask {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub reminder: Option<Reminder>,
}

impl FixedTask {
    pub fn new(name: TaskName, reminder: Option<Reminder>) -> Self {
        Self {
            id: generate_id(),
            name: name.into_inner(),
            reminder,
        }
    }
}

/// A task on a single day's checklist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub reminder: Option<Reminder>,
}

impl DailyTask {
    pub fn new(name: TaskName, reminder: Option<Reminder>) -> Self {
        Self {
            id: generate_id(),
            name: name.into_inner(),
            done: false,
            reminder,
        }
    }

    /// Copy a fixed template into a fresh, unchecked daily task
    pub fn from_fixed(fixed: &FixedTask) -> Self {
        Self {
            id: generate_id(),
            name: fixed.name.clone(),
            done: false,
            reminder: fixed.reminder,
        }
    }
}

/// Common view over both task kinds.
pub trait TaskRecord {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn reminder(&self) -> Option<&Reminder>;
}

impl TaskRecord for FixedTask {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reminder(&self) -> Option<&Reminder> {
        self.reminder.as_ref()
    }
}

impl TaskRecord for DailyTask {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reminder(&self) -> Option<&Reminder> {
        self.reminder.as_ref()
    }
}
