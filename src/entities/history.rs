use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recorded completion percentage for one calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub pct: u8,
}
