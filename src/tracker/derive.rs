//! Building a day's checklist from the fixed templates.

use std::collections::HashSet;

use crate::entities::{DailyTask, FixedTask};

/// Produce the daily tasks to append for every fixed task whose name
/// (case-insensitively) is not already on `existing`.
///
/// Returns an empty list when everything is already represented.
pub fn derive_from_fixed(fixed: &[FixedTask], existing: &[DailyTask]) -> Vec<DailyTask> {
    let mut seen: HashSet<String> = existing.iter().map(|task| task.name.to_lowercase()).collect();

    fixed
        .iter()
        .filter(|template| seen.insert(template.name.to_lowercase()))
        .map(DailyTask::from_fixed)
        .collect()
}
