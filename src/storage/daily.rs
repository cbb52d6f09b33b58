use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::db::{LocalStorage, StoreError};
use crate::constants::NAMESPACE_DAILY;
use crate::entities::DailyTask;
use crate::utils::datetime::date_key;

/// All daily lists, keyed by `YYYY-MM-DD`
pub type DailyMap = BTreeMap<String, Vec<DailyTask>>;

impl LocalStorage {
    /// Get the checklist for one date, or an empty list if none was started
    pub async fn daily_tasks(&self, date: NaiveDate) -> Result<Vec<DailyTask>, StoreError> {
        let mut all: DailyMap = self.read(NAMESPACE_DAILY).await?;
        Ok(all.remove(&date_key(date)).unwrap_or_default())
    }

    /// Replace the checklist for one date, leaving every other date untouched
    pub async fn save_daily_tasks(&self, date: NaiveDate, tasks: &[DailyTask]) -> Result<(), StoreError> {
        let mut all: DailyMap = self.read(NAMESPACE_DAILY).await?;
        all.insert(date_key(date), tasks.to_vec());
        self.write(NAMESPACE_DAILY, &all).await
    }
}
