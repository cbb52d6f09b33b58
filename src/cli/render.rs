//! Plain-text rendering of lists, the dashboard and history.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::constants::{
    HISTORY_BAR_WIDTH, INFO_EMPTY_FIXED, INFO_EMPTY_HISTORY, INFO_EMPTY_TODAY, INFO_NO_QUOTE, SHORT_ID_LEN,
};
use crate::entities::{DailyTask, FixedTask, HistoryEntry, Reminder, Tone};
use crate::quotes::pick_quote;
use crate::scheduler::{DispatchState, PendingInfo};
use crate::tracker::Progress;
use crate::utils::datetime::{format_day_heading, format_history_date};

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn reminder_badge(reminder: Option<&Reminder>) -> String {
    match reminder {
        Some(reminder) => format!("  ⏰ {} {}", reminder.time_label(), reminder.tone.icon()),
        None => String::new(),
    }
}

pub fn daily_line(task: &DailyTask) -> String {
    format!(
        "[{}] {}  {}{}",
        if task.done { "x" } else { " " },
        short_id(&task.id),
        task.name,
        reminder_badge(task.reminder.as_ref())
    )
}

pub fn fixed_line(task: &FixedTask) -> String {
    format!(
        "{}  {}{}",
        short_id(&task.id),
        task.name,
        reminder_badge(task.reminder.as_ref())
    )
}

pub fn daily_list(tasks: &[DailyTask]) -> String {
    if tasks.is_empty() {
        return INFO_EMPTY_TODAY.to_string();
    }
    tasks.iter().map(daily_line).collect::<Vec<_>>().join("\n")
}

pub fn fixed_list(tasks: &[FixedTask]) -> String {
    if tasks.is_empty() {
        return INFO_EMPTY_FIXED.to_string();
    }
    tasks.iter().map(fixed_line).collect::<Vec<_>>().join("\n")
}

pub fn dashboard(date: NaiveDate, progress: Progress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_day_heading(date));
    let _ = writeln!(
        out,
        "{}% complete ({} of {} done)",
        progress.pct, progress.done, progress.total
    );
    if progress.total > 0 {
        let quote = pick_quote(progress.pct);
        let _ = write!(out, "“{}” — {}", quote.text, quote.tag);
    } else {
        out.push_str(INFO_NO_QUOTE);
    }
    out
}

pub fn history_bar(pct: u8) -> String {
    let filled = (usize::from(pct.min(100)) * HISTORY_BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(HISTORY_BAR_WIDTH - filled))
}

pub fn history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return INFO_EMPTY_HISTORY.to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{:<13} {} {:>3}%",
                format_history_date(entry.date),
                history_bar(entry.pct),
                entry.pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tones(default: Tone) -> String {
    Tone::ALL
        .iter()
        .map(|tone| {
            format!(
                "{} {:<8} {:<8} {}",
                tone.icon(),
                tone.id(),
                tone.label(),
                if *tone == default { "(default)" } else { "" }
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn pending(infos: &[PendingInfo]) -> String {
    if infos.is_empty() {
        return "No reminders pending.".to_string();
    }
    infos
        .iter()
        .map(|info| {
            let path = match &info.state {
                DispatchState::Requesting => "requesting push",
                DispatchState::Remote(_) => "push scheduled",
                DispatchState::LocalTimer => "local timer",
                DispatchState::Fired => "fired",
                DispatchState::Withdrawn => "withdrawn",
            };
            format!(
                "{}  {}  {} ({})",
                info.fire_at.format("%H:%M"),
                short_id(&info.task_id),
                info.task_name,
                path
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
