//! Completion percentage.

use crate::entities::DailyTask;

/// Done/total counts for a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub pct: u8,
}

impl Progress {
    pub fn of(tasks: &[DailyTask]) -> Self {
        let done = tasks.iter().filter(|task| task.done).count();
        let total = tasks.len();
        Self {
            done,
            total,
            pct: pct_of(done, total),
        }
    }
}

/// `round(100 * done / total)` with halves rounded up, 0 for an empty list
pub fn compute_pct(tasks: &[DailyTask]) -> u8 {
    Progress::of(tasks).pct
}

fn pct_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    // (100 * done / total) + 1/2, floored, in integers
    ((200 * done + total) / (2 * total)) as u8
}
