//! Local storage module for routine data persistence
//!
//! One SQLite table holds three JSON namespaces:
//! - Fixed task templates
//! - Daily checklists, partitioned by date
//! - Completion history, keyed by date

pub mod daily;
pub mod db;
pub mod fixed;
pub mod history;

pub use daily::DailyMap;
pub use db::{LocalStorage, StoreError};
pub use history::HistoryMap;
