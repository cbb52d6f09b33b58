//! Constants used throughout the application
//!
//! This module centralizes storage keys, user-facing text, and default values
//! to keep wording and limits consistent between the one-shot commands and the
//! interactive session.

// Storage namespaces
pub const NAMESPACE_FIXED: &str = "routine_fixed";
pub const NAMESPACE_DAILY: &str = "routine_daily";
pub const NAMESPACE_HISTORY: &str = "routine_history";

// Files
pub const APP_DIR_NAME: &str = "routinely";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "routinely.toml";
pub const DATABASE_FILE_NAME: &str = "routinely.db";
pub const LOG_FILE_NAME: &str = "routinely.log";

// Notifications
pub const REMINDER_TITLE: &str = "⏰ Routine Reminder";
pub const REMINDER_ALERT_PREFIX: &str = "Reminder: ";
pub const PUSH_DEFAULT_ENDPOINT: &str = "https://onesignal.com/api/v1/notifications";
pub const PUSH_DEFAULT_API_KEY_ENV: &str = "ROUTINELY_PUSH_API_KEY";
pub const PUSH_DEFAULT_SEGMENT: &str = "Subscribed Users";

// Success Messages
pub const SUCCESS_TASK_CREATED: &str = "✅ Task added";
pub const SUCCESS_TASK_UPDATED: &str = "✅ Task updated";
pub const SUCCESS_TASK_DELETED: &str = "✅ Task deleted";
pub const SUCCESS_TASK_COMPLETED: &str = "✅ Task completed";
pub const SUCCESS_TASK_REOPENED: &str = "↩️ Task reopened";
pub const SUCCESS_FIXED_CREATED: &str = "✅ Fixed task added";
pub const SUCCESS_FIXED_UPDATED: &str = "✅ Fixed task updated";
pub const SUCCESS_FIXED_DELETED: &str = "✅ Fixed task deleted";
pub const SUCCESS_FIXED_LOADED: &str = "✅ Loaded fixed tasks into today";
pub const SUCCESS_DAY_SAVED: &str = "✅ Day saved!";

// Informational outcomes
pub const INFO_NO_FIXED_TASKS: &str = "No fixed tasks yet. Add some with `fixed add`.";
pub const INFO_ALL_FIXED_PRESENT: &str = "All fixed tasks are already in today's list.";
pub const INFO_NO_TASKS_TO_SAVE: &str = "No tasks to save.";
pub const INFO_EMPTY_TODAY: &str = "No tasks for today yet.";
pub const INFO_EMPTY_FIXED: &str = "No fixed tasks yet.";
pub const INFO_EMPTY_HISTORY: &str = "No history yet. Use `end-day` to record a day.";
pub const INFO_NO_QUOTE: &str = "Add tasks to start tracking your day.";

// Error Messages
pub const ERROR_VALIDATION: &str = "❌ Not saved";
pub const ERROR_COMMAND_FAILED: &str = "❌ Command failed";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const SESSION_STARTED: &str = "Routine session started. Type `help` for commands, `quit` to leave.";
pub const SESSION_PROMPT: &str = "routinely> ";

// Limits
/// Minimum session refresh interval in seconds
pub const REFRESH_INTERVAL_MIN_SECS: u64 = 1;
/// Maximum session refresh interval in seconds
pub const REFRESH_INTERVAL_MAX_SECS: u64 = 3600;
/// Default session refresh interval in seconds
pub const REFRESH_INTERVAL_DEFAULT_SECS: u64 = 60;
/// Wall-clock drift beyond which the session assumes it was suspended
pub const SUSPEND_DRIFT_SECS: i64 = 30;
/// Characters of a task id shown in listings
pub const SHORT_ID_LEN: usize = 8;
/// Width of the history bar in characters
pub const HISTORY_BAR_WIDTH: usize = 20;
