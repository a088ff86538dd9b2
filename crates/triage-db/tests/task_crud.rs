//! Task store integration tests.
//!
//! Covers the store contract end to end against in-memory and file-backed
//! databases: add/list/get/update/delete, toggles, ordering, and id reuse.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use triage_core::enums::{Priority, TaskStatus};
use triage_db::error::DatabaseError;
use triage_db::service::TaskStore;
use triage_db::updates::task::{TaskUpdate, TaskUpdateBuilder};

async fn test_store() -> TaskStore {
    TaskStore::new_local(":memory:").await.unwrap()
}

/// Raw column text for one row, bypassing entity parsing.
async fn raw_row(store: &TaskStore, id: i64) -> Vec<String> {
    let mut rows = store
        .db()
        .conn()
        .query(
            "SELECT CAST(id AS TEXT), description, priority, created_date, status FROM tasks WHERE id = ?1",
            [id],
        )
        .await
        .unwrap();
    let row = rows.next().await.unwrap().expect("row should exist");
    (0..5).map(|i| row.get::<String>(i).unwrap()).collect()
}

// ---------------------------------------------------------------------------
// add / get / list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_then_get_returns_fields() {
    let store = test_store().await;
    let id = store
        .add_task("Call client today", Priority::Urgent, TaskStatus::Pending)
        .await
        .unwrap();

    let task = store.get_task(id).await.unwrap().expect("task exists");
    assert_eq!(task.id, id);
    assert_eq!(task.description, "Call client today");
    assert_eq!(task.priority, Priority::Urgent);
    assert_eq!(task.status, TaskStatus::Pending);
}

#[tokio::test]
async fn get_missing_is_none() {
    let store = test_store().await;
    assert!(store.get_task(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn list_empty_store() {
    let store = test_store().await;
    assert!(store.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let store = test_store().await;
    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        ids.push(
            store
                .add_task(name, Priority::Normal, TaskStatus::Pending)
                .await
                .unwrap(),
        );
    }
    // Pin distinct timestamps so the order does not rest on the id tiebreak.
    store
        .db()
        .conn()
        .execute(
            "UPDATE tasks SET created_date = '2026-01-03T00:00:00Z' WHERE id = ?1",
            [ids[0]],
        )
        .await
        .unwrap();
    store
        .db()
        .conn()
        .execute(
            "UPDATE tasks SET created_date = '2026-01-01T00:00:00Z' WHERE id = ?1",
            [ids[2]],
        )
        .await
        .unwrap();
    store
        .db()
        .conn()
        .execute(
            "UPDATE tasks SET created_date = '2026-01-02T00:00:00Z' WHERE id = ?1",
            [ids[1]],
        )
        .await
        .unwrap();

    let listed: Vec<String> = store
        .list_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(listed, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn same_second_ties_break_by_id_descending() {
    let store = test_store().await;
    let first = store
        .add_task("first", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();
    let second = store
        .add_task("second", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();
    store
        .db()
        .conn()
        .execute(
            "UPDATE tasks SET created_date = '2026-01-01T00:00:00Z'",
            (),
        )
        .await
        .unwrap();

    let ids: Vec<i64> = store
        .list_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn mixed_timestamp_formats_order_by_instant() {
    let store = test_store().await;
    // Plain stamps are local time; 23:00 local on the 9th is later than
    // 01:00 UTC on the 9th in every real time zone.
    store
        .db()
        .conn()
        .execute(
            "INSERT INTO tasks (description, priority, created_date, status) VALUES
             ('plain-23h', 'Normal', '2026-02-09 23:00:00', 'Pending'),
             ('rfc-01h', 'Normal', '2026-02-09T01:00:00Z', 'Pending'),
             ('rfc-next-day', 'Normal', '2026-02-11T00:00:00Z', 'Pending')",
            (),
        )
        .await
        .unwrap();

    let listed: Vec<String> = store
        .list_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(listed, vec!["rfc-next-day", "plain-23h", "rfc-01h"]);
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_then_delete_restores_list() {
    let store = test_store().await;
    store
        .add_task("existing", Priority::Normal, TaskStatus::Completed)
        .await
        .unwrap();
    let before = store.list_tasks().await.unwrap();

    let id = store
        .add_task("temporary", Priority::Urgent, TaskStatus::Pending)
        .await
        .unwrap();
    store.delete_task(id).await.unwrap();

    assert_eq!(store.list_tasks().await.unwrap(), before);
}

#[tokio::test]
async fn delete_missing_is_ok() {
    let store = test_store().await;
    store.delete_task(999).await.unwrap();
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let store = test_store().await;
    let first = store
        .add_task("one", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();
    store.delete_task(first).await.unwrap();
    let second = store
        .add_task("two", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();
    assert!(second > first, "id {first} was reused");
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_update_leaves_row_identical() {
    let store = test_store().await;
    let id = store
        .add_task("untouched", Priority::Urgent, TaskStatus::Pending)
        .await
        .unwrap();
    let before = raw_row(&store, id).await;

    store.update_task(id, TaskUpdate::default()).await.unwrap();

    assert_eq!(raw_row(&store, id).await, before);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let store = test_store().await;
    let id = store
        .add_task("draft", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();
    let before = store.get_task(id).await.unwrap().unwrap();

    let update = TaskUpdateBuilder::new().description("final").build();
    store.update_task(id, update).await.unwrap();

    let after = store.get_task(id).await.unwrap().unwrap();
    assert_eq!(after.description, "final");
    assert_eq!(after.priority, before.priority);
    assert_eq!(after.status, before.status);
    assert_eq!(after.created_date, before.created_date);
}

#[tokio::test]
async fn update_all_fields_together() {
    let store = test_store().await;
    let id = store
        .add_task("draft", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();

    let update = TaskUpdateBuilder::new()
        .description("shipped")
        .priority(Priority::Urgent)
        .status(TaskStatus::Completed)
        .build();
    store.update_task(id, update).await.unwrap();

    let task = store.get_task(id).await.unwrap().unwrap();
    assert_eq!(task.description, "shipped");
    assert_eq!(task.priority, Priority::Urgent);
    assert_eq!(task.status, TaskStatus::Completed);
}

#[tokio::test]
async fn update_unknown_id_is_silent() {
    let store = test_store().await;
    let id = store
        .add_task("bystander", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();
    let before = store.list_tasks().await.unwrap();

    let update = TaskUpdateBuilder::new().status(TaskStatus::Completed).build();
    store.update_task(id + 100, update).await.unwrap();

    assert_eq!(store.list_tasks().await.unwrap(), before);
}

// ---------------------------------------------------------------------------
// toggles
// ---------------------------------------------------------------------------

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Completed)]
#[tokio::test]
async fn status_toggle_twice_is_identity(#[case] start: TaskStatus) {
    let store = test_store().await;
    let id = store
        .add_task("flip me", Priority::Normal, start)
        .await
        .unwrap();

    assert_eq!(store.toggle_status(id).await.unwrap(), Some(start.toggled()));
    assert_eq!(store.toggle_status(id).await.unwrap(), Some(start));
    assert_eq!(store.get_task(id).await.unwrap().unwrap().status, start);
}

#[rstest]
#[case(Priority::Urgent)]
#[case(Priority::Normal)]
#[tokio::test]
async fn priority_toggle_twice_is_identity(#[case] start: Priority) {
    let store = test_store().await;
    let id = store
        .add_task("flip me", start, TaskStatus::Pending)
        .await
        .unwrap();

    assert_eq!(store.toggle_priority(id).await.unwrap(), Some(start.toggled()));
    assert_eq!(store.toggle_priority(id).await.unwrap(), Some(start));
    assert_eq!(store.get_task(id).await.unwrap().unwrap().priority, start);
}

#[tokio::test]
async fn set_helpers_write_single_field() {
    let store = test_store().await;
    let id = store
        .add_task("helpers", Priority::Normal, TaskStatus::Pending)
        .await
        .unwrap();

    store.set_priority(id, Priority::Urgent).await.unwrap();
    store.set_status(id, TaskStatus::Completed).await.unwrap();

    let task = store.get_task(id).await.unwrap().unwrap();
    assert_eq!(task.priority, Priority::Urgent);
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.description, "helpers");
}

// ---------------------------------------------------------------------------
// storage failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unopenable_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("tasks.db");
    let result = TaskStore::new_local(&path.to_string_lossy()).await;
    assert!(matches!(
        result,
        Err(DatabaseError::LibSql(_) | DatabaseError::Migration(_))
    ));
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.db");
    let path = path.to_string_lossy().to_string();

    let id = {
        let store = TaskStore::new_local(&path).await.unwrap();
        store
            .add_task("survives restart", Priority::Urgent, TaskStatus::Pending)
            .await
            .unwrap()
    };

    let store = TaskStore::new_local(&path).await.unwrap();
    let task = store.get_task(id).await.unwrap().expect("persisted");
    assert_eq!(task.description, "survives restart");
}
