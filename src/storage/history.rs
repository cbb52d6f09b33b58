use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

use super::db::{LocalStorage, StoreError};
use crate::constants::NAMESPACE_HISTORY;
use crate::entities::HistoryEntry;
use crate::utils::datetime::{date_key, parse_date_key};

/// Completion percentages keyed by `YYYY-MM-DD`
pub type HistoryMap = BTreeMap<String, u8>;

impl LocalStorage {
    /// Get every recorded day, most recent first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let all: HistoryMap = self.read(NAMESPACE_HISTORY).await?;

        let mut entries: Vec<HistoryEntry> = all
            .into_iter()
            .filter_map(|(key, pct)| match parse_date_key(&key) {
                Ok(date) => Some(HistoryEntry { date, pct: pct.min(100) }),
                Err(_) => {
                    debug!("Skipping history entry with invalid date key '{}'", key);
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(entries)
    }

    /// Record (or overwrite) the percentage for a date
    pub async fn save_history_entry(&self, date: NaiveDate, pct: u8) -> Result<(), StoreError> {
        let mut all: HistoryMap = self.read(NAMESPACE_HISTORY).await?;
        all.insert(date_key(date), pct);
        self.write(NAMESPACE_HISTORY, &all).await
    }
}
