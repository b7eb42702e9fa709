//! Handler tests for the user lifecycle.

use std::sync::Arc;

use crate::{
    bus::{
        adapters::RecordingPublisher,
        domain::{ErrorCode, Topic},
    },
    handler::HandlerError,
    store::{
        Collection, DocumentStore, StoreError,
        adapters::InMemoryDocumentStore,
        ports::MockDocumentStore,
    },
    user::services::UserService,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    store: Arc<InMemoryDocumentStore>,
    publisher: Arc<RecordingPublisher>,
    service: UserService<InMemoryDocumentStore, RecordingPublisher>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryDocumentStore::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let service = UserService::new(Arc::clone(&store), Arc::clone(&publisher));
    Harness {
        store,
        publisher,
        service,
    }
}

fn create_payload(correlation_key: &str, id: &str) -> Value {
    json!({
        "correlationKey": correlation_key,
        "id": id,
        "email": "ada@example.com",
        "name": "Ada",
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_stores_user_and_publishes_success(harness: Harness) {
    let response = harness
        .service
        .create(&create_payload("c1", "u1"))
        .await
        .expect("store is healthy");

    assert!(response.status);
    assert_eq!(response.correlation_key, "c1");
    assert_eq!(response.id, "u1");
    let stored = harness
        .store
        .get(Collection::Users, "u1")
        .await
        .expect("read succeeds")
        .expect("user stored");
    assert_eq!(stored.get("email"), Some(&json!("ada@example.com")));
    let published = harness.publisher.last().expect("response published");
    assert_eq!(published.topic, Topic::UserCreated);
    assert_eq!(published.response, response);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_taken_id_reports_user_already_exists(harness: Harness) {
    harness
        .service
        .create(&create_payload("c1", "u1"))
        .await
        .expect("first create");

    let response = harness
        .service
        .create(&json!({"correlationKey": "c2", "id": "u1", "email": "other@example.com"}))
        .await
        .expect("store is healthy");

    assert!(!response.status);
    assert_eq!(response.error_code, Some(ErrorCode::UserAlreadyExists));
    let stored = harness
        .store
        .get(Collection::Users, "u1")
        .await
        .expect("read succeeds")
        .expect("user stored");
    assert_eq!(stored.get("email"), Some(&json!("ada@example.com")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_payload_is_rejected_without_writing(harness: Harness) {
    let response = harness
        .service
        .create(&json!({"correlationKey": "c1", "id": "u1", "email": "bad"}))
        .await
        .expect("store is healthy");

    assert!(!response.status);
    assert_eq!(response.error_code, Some(ErrorCode::InvalidMessageData));
    assert_eq!(response.message, "Invalid user data");
    assert_eq!(harness.store.count(Collection::Users).expect("count"), 0);
    assert_eq!(
        harness.publisher.last().map(|entry| entry.topic),
        Some(Topic::UserCreated)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_merges_supplied_fields(harness: Harness) {
    harness
        .service
        .create(&create_payload("c1", "u1"))
        .await
        .expect("create");

    let response = harness
        .service
        .update(&json!({"correlationKey": "c2", "id": "u1", "name": "Countess"}))
        .await
        .expect("store is healthy");

    assert!(response.status);
    let stored = harness
        .store
        .get(Collection::Users, "u1")
        .await
        .expect("read succeeds")
        .expect("user stored");
    assert_eq!(stored.get("name"), Some(&json!("Countess")));
    assert_eq!(stored.get("email"), Some(&json!("ada@example.com")));
}

#[rstest]
#[case::update(Topic::UserUpdated)]
#[case::delete(Topic::UserDeleted)]
#[tokio::test(flavor = "multi_thread")]
async fn missing_user_reports_user_not_found(harness: Harness, #[case] topic: Topic) {
    let payload = json!({"correlationKey": "c9", "id": "ghost", "name": "Nobody"});

    let response = match topic {
        Topic::UserDeleted => harness.service.delete(&payload).await,
        _ => harness.service.update(&payload).await,
    }
    .expect("store is healthy");

    assert!(!response.status);
    assert_eq!(response.error_code, Some(ErrorCode::UserNotFound));
    assert_eq!(harness.store.count(Collection::Users).expect("count"), 0);
    assert_eq!(harness.publisher.last().map(|entry| entry.topic), Some(topic));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_existing_user(harness: Harness) {
    harness
        .service
        .create(&create_payload("c1", "u1"))
        .await
        .expect("create");

    let response = harness
        .service
        .delete(&json!({"correlationKey": "c3", "id": "u1"}))
        .await
        .expect("store is healthy");

    assert!(response.status);
    assert_eq!(harness.store.count(Collection::Users).expect("count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_is_returned_and_nothing_is_published() {
    let mut store = MockDocumentStore::new();
    store
        .expect_create()
        .returning(|_, _, _| Err(StoreError::persistence(std::io::Error::other("offline"))));
    let publisher = Arc::new(RecordingPublisher::new());
    let service = UserService::new(Arc::new(store), Arc::clone(&publisher));

    let result = service.create(&create_payload("c1", "u1")).await;

    assert!(matches!(
        result,
        Err(HandlerError::Store(StoreError::Persistence(_)))
    ));
    assert!(publisher.published().is_empty());
}
