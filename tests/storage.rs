mod common;

use chrono::NaiveDate;
use common::{task, temp_storage};
use routinely::constants::{NAMESPACE_DAILY, NAMESPACE_FIXED, NAMESPACE_HISTORY};
use routinely::entities::{DailyTask, Tone};
use routinely::storage::{DailyMap, LocalStorage};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
}

#[tokio::test]
async fn test_local_storage_creation() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("routinely.db");
    let result = LocalStorage::open(&path).await;
    assert!(result.is_ok(), "LocalStorage should be created successfully");
    assert!(path.exists());
}

#[tokio::test]
async fn test_missing_namespaces_read_as_empty() {
    let (_dir, storage) = temp_storage().await;
    assert!(storage.fixed_tasks().await.unwrap().is_empty());
    assert!(storage.daily_tasks(day(15)).await.unwrap().is_empty());
    assert!(storage.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupted_namespaces_read_as_empty() {
    let (_dir, storage) = temp_storage().await;
    storage.write_raw(NAMESPACE_FIXED, "{not json").await.unwrap();
    storage.write_raw(NAMESPACE_DAILY, "[1, 2, 3]").await.unwrap();
    storage.write_raw(NAMESPACE_HISTORY, "null").await.unwrap();

    assert!(storage.fixed_tasks().await.unwrap().is_empty());
    assert!(storage.daily_tasks(day(15)).await.unwrap().is_empty());
    assert!(storage.history().await.unwrap().is_empty());

    // A later write replaces the corrupted value
    storage.save_fixed_tasks(&[]).await.unwrap();
    storage
        .save_daily_tasks(day(15), &[task("Stretch", None)])
        .await
        .unwrap();
    assert_eq!(storage.daily_tasks(day(15)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_daily_lists_are_isolated_by_date() {
    let (_dir, storage) = temp_storage().await;
    storage
        .save_daily_tasks(day(14), &[task("Yesterday", None)])
        .await
        .unwrap();
    storage
        .save_daily_tasks(day(15), &[task("Stretch", Some((7, 0, Tone::Chime)))])
        .await
        .unwrap();

    let yesterday = storage.daily_tasks(day(14)).await.unwrap();
    assert_eq!(yesterday.len(), 1);
    assert_eq!(yesterday[0].name, "Yesterday");

    storage.save_daily_tasks(day(15), &[]).await.unwrap();
    assert_eq!(storage.daily_tasks(day(14)).await.unwrap().len(), 1);
    assert!(storage.daily_tasks(day(15)).await.unwrap().is_empty());

    let all: DailyMap = storage.read(NAMESPACE_DAILY).await.unwrap();
    assert!(all.contains_key("2026-06-14"));
}

#[tokio::test]
async fn test_stored_layout_is_json() {
    let (_dir, storage) = temp_storage().await;
    storage
        .write_raw(
            NAMESPACE_DAILY,
            r#"{"2026-06-15":[{"id":"a1","name":"Stretch","done":true,"reminder":{"time":"07:00","tone":"chime"}},
                {"id":"b2","name":"Read","done":false,"reminder":{"time":"25:99"}},
                {"id":"c3","name":"Walk","done":false}]}"#,
        )
        .await
        .unwrap();

    let tasks: Vec<DailyTask> = storage.daily_tasks(day(15)).await.unwrap();
    assert_eq!(tasks.len(), 3);
    assert!(tasks[0].done);
    assert_eq!(tasks[0].reminder.map(|r| r.tone), Some(Tone::Chime));
    // A malformed reminder is dropped, the task is kept
    assert_eq!(tasks[1].reminder, None);
    assert_eq!(tasks[2].reminder, None);
}

#[tokio::test]
async fn test_blank_tone_reads_as_gentle() {
    let (_dir, storage) = temp_storage().await;
    storage
        .write_raw(
            NAMESPACE_FIXED,
            r#"[{"id":"a1","name":"Stretch","reminder":{"time":"07:00","tone":null}},
                {"id":"b2","name":"Read","reminder":{"time":"08:00","tone":""}},
                {"id":"c3","name":"Walk","reminder":{"time":"09:00"}},
                {"id":"d4","name":"Nap","reminder":{"time":"13:00","tone":"siren"}}]"#,
        )
        .await
        .unwrap();

    let tasks = storage.fixed_tasks().await.unwrap();
    assert_eq!(tasks.len(), 4);
    for task in &tasks[..3] {
        assert_eq!(task.reminder.map(|r| r.tone), Some(Tone::Gentle), "{}", task.name);
    }
    assert_eq!(tasks[0].reminder.map(|r| r.time_label()).as_deref(), Some("07:00"));
    // An unknown tone still drops the reminder
    assert_eq!(tasks[3].reminder, None);
}

#[tokio::test]
async fn test_history_overwrites_and_skips_bad_keys() {
    let (_dir, storage) = temp_storage().await;
    storage
        .write_raw(NAMESPACE_HISTORY, r#"{"2026-06-13":40,"garbage":10,"2026-06-14":120}"#)
        .await
        .unwrap();

    storage.save_history_entry(day(15), 50).await.unwrap();
    storage.save_history_entry(day(15), 80).await.unwrap();

    let history = storage.history().await.unwrap();
    let view: Vec<(NaiveDate, u8)> = history.iter().map(|e| (e.date, e.pct)).collect();
    assert_eq!(view, vec![(day(15), 80), (day(14), 100), (day(13), 40)]);
}
