//! Routinely - a local-first daily routine tracker
//!
//! Keeps a list of fixed (recurring) tasks and a dated checklist per day,
//! arms reminders for today's open tasks and records a completion
//! percentage per day.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Namespaced JSON persistence over SQLite
//! * [`tracker`] - Task lists, derivation from fixed tasks and completion
//! * [`scheduler`] - Reminder planning and two-path delivery
//! * [`notify`] - Push, notification, tone and alert capabilities
//! * [`cli`] / [`session`] - One-shot commands and the interactive session

/// Command-line parsing, task commands and text rendering
pub mod cli;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Persisted models and the SeaORM key/value entity
pub mod entities;

/// Logging setup
pub mod logger;

/// Notification capabilities and their implementations
pub mod notify;

/// Motivational quotes by completion band
pub mod quotes;

/// Repository layer for database operations
pub mod repositories;

/// Reminder scheduling
pub mod scheduler;

/// Interactive session keeping reminders armed
pub mod session;

/// Local persistence of task lists and history
pub mod storage;

/// Task model service
pub mod tracker;

/// Clock abstraction and date/time helpers
pub mod utils;
