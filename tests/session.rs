mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{at, settle, temp_storage, FakePush, Harness};
use routinely::constants::{ERROR_VALIDATION, INFO_NO_FIXED_TASKS, SUCCESS_TASK_CREATED};
use routinely::entities::Tone;
use routinely::session::{LineOutcome, Session};
use routinely::storage::LocalStorage;
use routinely::tracker::Tracker;

async fn session(harness: &Harness, storage: LocalStorage) -> Session {
    let tracker = Tracker::load(storage, Arc::new(harness.clock.clone())).await.unwrap();
    Session::new(tracker, harness.scheduler(), Tone::Gentle, Duration::from_secs(60))
}

fn text(outcome: LineOutcome) -> String {
    match outcome {
        LineOutcome::Continue(output) => output,
        LineOutcome::Quit => panic!("unexpected quit"),
    }
}

#[tokio::test]
async fn test_commands_rearm_reminders() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(8, 0), true, None);
    let mut session = session(&harness, storage).await;
    session.start();
    assert!(session.scheduler().pending().is_empty());

    let output = text(session.handle_line("add Morning stretch --at 08:30 --tone chime").await);
    assert!(output.starts_with(SUCCESS_TASK_CREATED));
    assert!(output.contains("Morning stretch"));
    assert_eq!(session.scheduler().pending().len(), 1);

    let id = session.tracker().today()[0].id.clone();
    text(session.handle_line(&format!("toggle {}", &id[..8])).await);
    assert!(session.tracker().today()[0].done);
    assert!(session.scheduler().pending().is_empty());

    text(session.handle_line(&format!("toggle {}", id)).await);
    assert_eq!(session.scheduler().pending().len(), 1);

    text(session.handle_line(&format!("delete {}", id)).await);
    assert!(session.scheduler().pending().is_empty());
}

#[tokio::test]
async fn test_errors_and_help_keep_the_session_alive() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(8, 0), true, None);
    let mut session = session(&harness, storage).await;

    let output = text(session.handle_line("add Stretch --at 7:00").await);
    assert!(output.starts_with(ERROR_VALIDATION));
    assert!(session.tracker().today().is_empty());

    let output = text(session.handle_line("load-fixed").await);
    assert_eq!(output, INFO_NO_FIXED_TASKS);

    let output = text(session.handle_line("help").await);
    assert!(output.contains("pending"));
    assert!(output.contains("end-day"));

    let output = text(session.handle_line("frobnicate").await);
    assert!(!output.is_empty());

    assert_eq!(session.handle_line("   ").await, LineOutcome::Continue(String::new()));
    assert_eq!(session.handle_line("quit").await, LineOutcome::Quit);
    assert_eq!(session.handle_line("exit").await, LineOutcome::Quit);
}

#[tokio::test]
async fn test_refresh_picks_up_external_edits_and_rollover() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(8, 0), true, None);
    let mut session = session(&harness, storage.clone()).await;
    session.start();

    assert!(!session.refresh(false).await);
    assert!(session.refresh(true).await);

    // Another process adds a task with a reminder
    let mut other = Tracker::load(storage, Arc::new(harness.clock.clone())).await.unwrap();
    other
        .add_task("Walk", Some(routinely::entities::Reminder::new(common::time(9, 0), Tone::Gentle)))
        .await
        .unwrap();

    assert!(session.refresh(false).await);
    assert_eq!(session.scheduler().pending().len(), 1);

    // Next morning the list is empty and nothing stays armed
    harness.clock.advance(chrono::Duration::days(1));
    assert!(session.refresh(false).await);
    assert!(session.tracker().today().is_empty());
    assert!(session.scheduler().pending().is_empty());
}

#[tokio::test]
async fn test_run_reads_until_quit() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(8, 0), true, None);
    let session = session(&harness, storage.clone()).await;

    let input = tokio::io::BufReader::new(&b"add Stretch\nend-day\nquit\nadd Ignored\n"[..]);
    session.run(input).await.unwrap();

    let tracker = Tracker::load(storage, Arc::new(harness.clock.clone())).await.unwrap();
    assert_eq!(tracker.today().len(), 1);
    assert_eq!(tracker.history().await.unwrap()[0].pct, 0);
}

#[tokio::test]
async fn test_command_after_midnight_uses_the_new_day() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(23, 50), true, None);
    let mut session = session(&harness, storage.clone()).await;
    session.start();

    text(session.handle_line("add Yesterday --at 08:00").await);
    harness.clock.advance(chrono::Duration::minutes(20));
    text(session.handle_line("add NewDay --at 09:00").await);

    let yesterday = at(0, 0).date_naive();
    let today = yesterday.succ_opt().unwrap();
    assert_eq!(session.tracker().today_date(), today);

    let names: Vec<&str> = session.tracker().today().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["NewDay"]);

    let stored_today = storage.daily_tasks(today).await.unwrap();
    assert_eq!(stored_today.len(), 1);
    assert_eq!(stored_today[0].name, "NewDay");
    let stored_yesterday = storage.daily_tasks(yesterday).await.unwrap();
    assert_eq!(stored_yesterday.len(), 1);
    assert_eq!(stored_yesterday[0].name, "Yesterday");

    let pending = session.scheduler().pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].task_name, "NewDay");
    assert_eq!(pending[0].fire_at.date_naive(), today);
}

#[tokio::test]
async fn test_pending_after_midnight_drops_yesterdays_reminders() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(23, 0), true, None);
    let mut session = session(&harness, storage).await;
    session.start();

    text(session.handle_line("add Late --at 23:30").await);
    assert_eq!(session.scheduler().pending().len(), 1);

    harness.clock.advance(chrono::Duration::hours(1));
    let output = text(session.handle_line("pending").await);
    assert!(!output.contains("Late"));
    assert!(session.scheduler().pending().is_empty());
    assert!(session.tracker().today().is_empty());
}

#[tokio::test]
async fn test_fixed_list_changes_rebuild_reminders() {
    let (_dir, storage) = temp_storage().await;
    let harness = Harness::new(at(8, 0), true, Some(FakePush::new(true)));
    let push = harness.push.clone().unwrap();
    let mut session = session(&harness, storage).await;
    session.start();

    text(session.handle_line("add Stretch --at 09:00").await);
    settle().await;
    assert_eq!(push.scheduled.lock().unwrap().len(), 1);

    text(session.handle_line("fixed add Template --at 10:00").await);
    settle().await;
    assert_eq!(push.scheduled.lock().unwrap().len(), 2);
    assert_eq!(push.cancelled.lock().unwrap().len(), 1);

    let id = session.tracker().fixed()[0].id.clone();
    text(session.handle_line(&format!("fixed delete {}", id)).await);
    settle().await;
    assert_eq!(push.scheduled.lock().unwrap().len(), 3);
    assert_eq!(session.scheduler().pending().len(), 1);
}
