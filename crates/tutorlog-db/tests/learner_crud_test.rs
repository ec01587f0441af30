//! Learner CRUD integration tests against a live Postgres instance.
//!
//! Run with `cargo test -p tutorlog-db --features migrations -- --ignored`
//! against the test database described in `test_fixtures`.

use tutorlog_db::test_fixtures::{cleanup_learner, learner_fixture, test_database};
use tutorlog_db::{
    CreateLearnerRequest, Error, LearnerRepository, UpdateLearnerRequest,
};
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_learner_applies_defaults() {
    let db = test_database().await;

    let id = db
        .learners
        .insert(CreateLearnerRequest {
            name: "Ana".to_string(),
            language: Some("".to_string()),
            level: Some("".to_string()),
        })
        .await
        .expect("insert should succeed");

    let learner = db.learners.fetch(id).await.expect("fetch should succeed");
    assert_eq!(learner.name, "Ana");
    assert_eq!(learner.language, "English");
    assert_eq!(learner.level, None);

    cleanup_learner(&db, id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_learner_blank_name_no_insert() {
    let db = test_database().await;

    let result = db
        .learners
        .insert(CreateLearnerRequest {
            name: "   ".to_string(),
            language: Some("Spanish".to_string()),
            level: None,
        })
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_fetch_unknown_learner_not_found() {
    let db = test_database().await;
    let id = Uuid::new_v4();

    match db.learners.fetch(id).await {
        Err(Error::LearnerNotFound(missing)) => assert_eq!(missing, id),
        other => panic!("Expected LearnerNotFound, got {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_update_learner_in_place() {
    let db = test_database().await;
    let id = learner_fixture(&db, "Updatable", "French").await;

    db.learners
        .update(
            id,
            UpdateLearnerRequest {
                name: "Renamed".to_string(),
                language: Some("Italian".to_string()),
                level: Some("  ".to_string()),
            },
        )
        .await
        .expect("update should succeed");

    let learner = db.learners.fetch(id).await.unwrap();
    assert_eq!(learner.name, "Renamed");
    assert_eq!(learner.language, "Italian");
    assert_eq!(learner.level, None, "blank level becomes absent");

    cleanup_learner(&db, id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_update_unknown_learner_not_found() {
    let db = test_database().await;

    let result = db
        .learners
        .update(
            Uuid::new_v4(),
            UpdateLearnerRequest {
                name: "Ghost".to_string(),
                language: None,
                level: None,
            },
        )
        .await;

    assert!(matches!(result, Err(Error::LearnerNotFound(_))));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_creation_timestamp_is_set_once() {
    let db = test_database().await;
    let id = learner_fixture(&db, "Timestamped", "German").await;

    let before = db.learners.fetch(id).await.unwrap().created_at_utc;
    db.learners
        .update(
            id,
            UpdateLearnerRequest {
                name: "Timestamped Still".to_string(),
                language: Some("German".to_string()),
                level: None,
            },
        )
        .await
        .unwrap();
    let after = db.learners.fetch(id).await.unwrap().created_at_utc;

    assert_eq!(before, after, "updates must not touch created_at_utc");

    cleanup_learner(&db, id).await;
}
