//! Integration tests for the embedded libSQL backend.

use std::sync::Arc;

use lead_core::enums::{Category, SubmissionStatus};
use lead_core::submission::Submission;
use lead_store::{LibsqlStore, StoreError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(id: &str) -> Submission {
    serde_json::from_value(json!({
        "id": id,
        "submittedAt": "2026-04-02T12:00:00.000Z",
        "status": "new",
        "firstName": "Jane",
        "email": "jane@x.com",
        "service": "web-design"
    }))
    .unwrap()
}

async fn test_db() -> LibsqlStore {
    LibsqlStore::open_local(":memory:").await.unwrap()
}

#[tokio::test]
async fn empty_category_reads_empty() {
    let db = test_db().await;
    assert!(db.read_all(Category::Contact).await.unwrap().is_empty());
}

#[tokio::test]
async fn records_round_trip_newest_first() {
    let db = test_db().await;
    db.append(Category::Contact, &record("sub-a")).await.unwrap();
    db.append(Category::Contact, &record("sub-b")).await.unwrap();

    let all = db.read_all(Category::Contact).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], record("sub-b"));
    assert_eq!(all[1], record("sub-a"));
}

#[tokio::test]
async fn categories_are_isolated() {
    let db = test_db().await;
    db.append(Category::General, &record("sub-1")).await.unwrap();
    db.append(Category::Contact, &record("sub-1")).await.unwrap();

    assert_eq!(db.count(Category::General).await.unwrap(), 1);
    assert_eq!(db.count(Category::Contact).await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_id_within_category_is_rejected() {
    let db = test_db().await;
    db.append(Category::General, &record("sub-1")).await.unwrap();

    let result = db.append(Category::General, &record("sub-1")).await;
    assert!(matches!(result, Err(StoreError::DuplicateId { .. })));
    assert_eq!(db.count(Category::General).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.db");
    let db = Arc::new(LibsqlStore::open_local(&path.to_string_lossy()).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..20 {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            db.append(Category::General, &record(&format!("sub-{i}")))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(db.count(Category::General).await.unwrap(), 20);
}

#[tokio::test]
async fn status_update_persists() {
    let db = test_db().await;
    db.append(Category::General, &record("sub-1")).await.unwrap();

    let updated = db
        .update_status(Category::General, "sub-1", SubmissionStatus::Closed)
        .await
        .unwrap();
    assert_eq!(updated.status, SubmissionStatus::Closed);

    let stored = db.get(Category::General, "sub-1").await.unwrap();
    assert_eq!(stored.status, SubmissionStatus::Closed);
    assert_eq!(stored.field("service"), Some("web-design"));

    let reopened = db
        .update_status(Category::General, "sub-1", SubmissionStatus::New)
        .await
        .unwrap();
    assert_eq!(reopened.status, SubmissionStatus::New);
}

#[tokio::test]
async fn invalid_transition_leaves_row_alone() {
    let db = test_db().await;
    db.append(Category::General, &record("sub-1")).await.unwrap();
    db.update_status(Category::General, "sub-1", SubmissionStatus::Contacted)
        .await
        .unwrap();

    let result = db
        .update_status(Category::General, "sub-1", SubmissionStatus::New)
        .await;
    assert!(matches!(result, Err(StoreError::InvalidTransition { .. })));

    let stored = db.get(Category::General, "sub-1").await.unwrap();
    assert_eq!(stored.status, SubmissionStatus::Contacted);
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.db");
    let path = path.to_string_lossy();

    {
        let db = LibsqlStore::open_local(&path).await.unwrap();
        db.append(Category::Contact, &record("sub-1")).await.unwrap();
    }

    let db = LibsqlStore::open_local(&path).await.unwrap();
    assert_eq!(db.read_all(Category::Contact).await.unwrap(), vec![record("sub-1")]);
}
