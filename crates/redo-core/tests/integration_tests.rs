use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use redo_core::error::CoreError;
use redo_core::models::*;
use redo_core::repository::{JsonRepository, TaskRepository};
use serde_json::json;
use tempfile::TempDir;

/// Helper function to create a repository backed by a temp file
fn setup_test_repo() -> (JsonRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("tasks.json");
    (JsonRepository::new(path, Tz::UTC), temp_dir)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_empty_store_loads_nothing() {
    let (repo, _temp_dir) = setup_test_repo();
    assert!(repo.find_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_and_find_task() {
    let (repo, _temp_dir) = setup_test_repo();

    let task = repo
        .add_task(NewTaskData {
            text: "  Buy milk  ".to_string(),
            priority: Some(TaskPriority::Low),
            list_id: Some("groceries".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to add task");

    assert_eq!(task.text, "Buy milk");
    assert!(!task.is_recurring);

    let found = repo.find_task_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(found, task);

    let prefix = &task.id.to_string()[..8];
    let matches = repo.find_tasks_by_short_id_prefix(prefix).await.unwrap();
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn test_add_rejects_blank_text() {
    let (repo, _temp_dir) = setup_test_repo();
    let result = repo
        .add_task(NewTaskData {
            text: "   ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
}

#[tokio::test]
async fn test_complete_single_task() {
    let (repo, _temp_dir) = setup_test_repo();
    let task = repo
        .add_task(NewTaskData {
            text: "One-off".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    match repo.complete_task(task.id).await.unwrap() {
        CompletionResult::Single(done) => {
            assert!(done.completed);
            assert!(done.completed_at.is_some());
        }
        other => panic!("Expected a single completion, got {:?}", other),
    }
    assert_eq!(repo.find_tasks().await.unwrap().len(), 1);

    // Completing twice is rejected
    assert!(matches!(
        repo.complete_task(task.id).await,
        Err(CoreError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_complete_recurring_task_creates_next_instance() {
    let (repo, _temp_dir) = setup_test_repo();
    let due = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let root = repo
        .add_task(NewTaskData {
            text: "Pay rent".to_string(),
            due_date: Some(due),
            recurrence: Some(RecurrencePattern::monthly(1)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(root.is_recurring);

    let next = match repo.complete_task(root.id).await.unwrap() {
        CompletionResult::Recurring { completed, next } => {
            assert_eq!(completed.id, root.id);
            next
        }
        other => panic!("Expected a recurring completion, got {:?}", other),
    };
    assert_eq!(next.due_date.unwrap().date_naive(), date(2024, 2, 15));
    assert_eq!(next.parent_recurrence_id, Some(root.id));
    assert_eq!(next.recurrence_count, 1);

    // The chain continues from the new instance and still points at the root
    let third = match repo.complete_task(next.id).await.unwrap() {
        CompletionResult::Recurring { next, .. } => next,
        other => panic!("Expected a recurring completion, got {:?}", other),
    };
    assert_eq!(third.due_date.unwrap().date_naive(), date(2024, 3, 15));
    assert_eq!(third.parent_recurrence_id, Some(root.id));
    assert_eq!(third.recurrence_count, 2);

    let all = repo.find_tasks().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all.iter().filter(|t| t.completed).count(), 2);
}

#[tokio::test]
async fn test_complete_past_end_date_ends_chain() {
    let (repo, _temp_dir) = setup_test_repo();
    let task = repo
        .add_task(NewTaskData {
            text: "Course homework".to_string(),
            due_date: Some(Utc.with_ymd_and_hms(2024, 5, 30, 12, 0, 0).unwrap()),
            recurrence: Some(RecurrencePattern::weekly(1).with_end_date(date(2024, 6, 1))),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(matches!(
        repo.complete_task(task.id).await.unwrap(),
        CompletionResult::RecurrenceEnded(_)
    ));
    assert_eq!(repo.find_tasks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_task() {
    let (repo, _temp_dir) = setup_test_repo();
    let task = repo
        .add_task(NewTaskData {
            text: "Temporary".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    repo.delete_task(task.id).await.unwrap();
    assert!(repo.find_task_by_id(task.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete_task(task.id).await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_legacy_document_is_migrated_on_load() {
    let (repo, _temp_dir) = setup_test_repo();
    let legacy = json!([
        {
            "id": "01890a5d-ac96-774b-bcce-b302099a8001",
            "text": "Standup",
            "createdAt": "2023-05-01T08:00:00Z",
            "isRecurring": true,
            "recurrence": {"type": "weekdays", "startDate": "2023-05-01"}
        },
        {
            "id": "01890a5d-ac96-774b-bcce-b302099a8002",
            "text": "Birthday card",
            "createdAt": "2023-05-01T08:00:00Z",
            "isRecurring": true,
            "recurrence": {"type": "yearly"}
        },
        {
            "id": "01890a5d-ac96-774b-bcce-b302099a8003",
            "text": "Water plants",
            "createdAt": "2023-05-01T08:00:00Z",
            "isRecurring": true,
            "recurrence": {"type": "sometimes", "interval": 0}
        },
        {
            "id": "01890a5d-ac96-774b-bcce-b302099a8004",
            "text": "Plain",
            "createdAt": "2023-05-01T08:00:00Z",
            "recurrence": null
        }
    ]);
    std::fs::write(repo.path(), legacy.to_string()).unwrap();

    let loaded = repo.load().await.unwrap();
    let standup = &loaded.tasks[0];
    assert_eq!(
        standup.recurrence,
        Some(RecurrencePattern::weekly_on(1, &[1, 2, 3, 4, 5]).with_start_date(date(2023, 5, 1)))
    );

    let birthday = &loaded.tasks[1];
    assert_eq!(birthday.recurrence, None);
    assert!(!birthday.is_recurring);

    let plants = &loaded.tasks[2];
    let kept = plants.recurrence.as_ref().unwrap();
    assert_eq!(kept.kind, RecurrenceType::Unknown("sometimes".to_string()));
    assert_eq!(kept.interval, 1);

    assert_eq!(loaded.tasks[3].recurrence, None);

    assert_eq!(loaded.report.migrated, 1);
    assert_eq!(loaded.report.dropped.len(), 1);
    assert_eq!(loaded.report.dropped[0].0, birthday.id);
    assert_eq!(loaded.report.passed_through.len(), 1);
    assert!(loaded.report.unreadable.is_empty());
}

#[tokio::test]
async fn test_migrate_rewrites_storage_canonically() {
    let (repo, _temp_dir) = setup_test_repo();
    let legacy = json!({
        "tasks": [{
            "id": "01890a5d-ac96-774b-bcce-b302099a8010",
            "text": "Team sync",
            "createdAt": "2023-05-01T08:00:00Z",
            "recurrence": {"type": "biweekly", "daysOfWeek": [2]}
        }]
    });
    std::fs::write(repo.path(), legacy.to_string()).unwrap();

    let report = repo.migrate().await.unwrap();
    assert_eq!(report.migrated, 1);
    assert!(!report.has_warnings());

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
    assert_eq!(
        stored["tasks"][0]["recurrence"],
        json!({"type": "weekly", "interval": 2, "daysOfWeek": [2]})
    );

    // A second pass changes nothing
    let again = repo.migrate().await.unwrap();
    assert_eq!(again, report);
    let restored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
    assert_eq!(restored, stored);
}

#[tokio::test]
async fn test_rejects_non_list_document() {
    let (repo, _temp_dir) = setup_test_repo();
    std::fs::write(repo.path(), r#"{"tasks": 5}"#).unwrap();
    assert!(matches!(repo.load().await, Err(CoreError::InvalidInput(_))));

    std::fs::write(repo.path(), "not json").unwrap();
    assert!(matches!(repo.load().await, Err(CoreError::Serialization(_))));
}
