//! Routing and settlement tests for the dispatcher.

use std::sync::Arc;

use crate::{
    bus::{
        adapters::RecordingPublisher,
        domain::{Acknowledgement, ErrorCode, Topic},
        ports::{MockResponsePublisher, PublishError},
        services::Dispatcher,
    },
    store::{Collection, StoreError, adapters::InMemoryDocumentStore, ports::MockDocumentStore},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    store: Arc<InMemoryDocumentStore>,
    publisher: Arc<RecordingPublisher>,
    dispatcher: Dispatcher<InMemoryDocumentStore, RecordingPublisher, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryDocumentStore::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let dispatcher = Dispatcher::new(
        Arc::clone(&store),
        Arc::clone(&publisher),
        Arc::new(DefaultClock),
    );
    Harness {
        store,
        publisher,
        dispatcher,
    }
}

fn bytes(payload: &Value) -> Vec<u8> {
    serde_json::to_vec(payload).expect("serializable")
}

#[rstest]
#[case(Topic::UserCreated, json!({"correlationKey": "c", "id": "u1", "email": "a@b.io"}))]
#[case(Topic::ProjectCreated, json!({"correlationKey": "c", "id": "p1", "name": "Apollo"}))]
#[case(Topic::TaskCreated, json!({"correlationKey": "c", "id": "t1", "projectId": "p1", "name": "Draft"}))]
#[tokio::test(flavor = "multi_thread")]
async fn each_topic_reaches_its_handler(
    harness: Harness,
    #[case] topic: Topic,
    #[case] payload: Value,
) {
    let acknowledgement = harness
        .dispatcher
        .dispatch(topic.request_name(), &bytes(&payload))
        .await;

    assert_eq!(acknowledgement, Acknowledgement::Ack);
    let published = harness.publisher.last().expect("response published");
    assert_eq!(published.topic, topic);
    assert!(published.response.status);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_topic_is_acknowledged_without_response(harness: Harness) {
    let acknowledgement = harness
        .dispatcher
        .dispatch("user.renamed.request", b"{}")
        .await;

    assert_eq!(acknowledgement, Acknowledgement::Ack);
    assert!(harness.publisher.published().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn business_failure_is_acknowledged(harness: Harness) {
    let payload = bytes(&json!({"correlationKey": "c", "id": "ghost"}));

    let acknowledgement = harness
        .dispatcher
        .dispatch(Topic::UserDeleted.request_name(), &payload)
        .await;

    assert_eq!(acknowledgement, Acknowledgement::Ack);
    assert_eq!(
        harness.publisher.last().map(|entry| entry.response.error_code),
        Some(Some(ErrorCode::UserNotFound))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_json_payload_is_answered_as_invalid(harness: Harness) {
    let acknowledgement = harness
        .dispatcher
        .dispatch(Topic::ProjectUpdated.request_name(), b"not json")
        .await;

    assert_eq!(acknowledgement, Acknowledgement::Ack);
    let published = harness.publisher.last().expect("response published");
    assert_eq!(published.topic, Topic::ProjectUpdated);
    assert_eq!(
        published.response.error_code,
        Some(ErrorCode::InvalidMessageData)
    );
    assert_eq!(published.response.correlation_key, "");
    assert_eq!(
        harness.store.count(Collection::Projects).expect("count"),
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_is_nacked_with_unknown_error_response() {
    let mut store = MockDocumentStore::new();
    store
        .expect_get()
        .returning(|_, _| Err(StoreError::persistence(std::io::Error::other("refused"))));
    let publisher = Arc::new(RecordingPublisher::new());
    let dispatcher = Dispatcher::new(
        Arc::new(store),
        Arc::clone(&publisher),
        Arc::new(DefaultClock),
    );
    let payload = bytes(&json!({"correlationKey": "c9", "id": "t1", "completedBy": "u1"}));

    let acknowledgement = dispatcher
        .dispatch(Topic::TaskCompleted.request_name(), &payload)
        .await;

    assert_eq!(acknowledgement, Acknowledgement::Nack);
    let published = publisher.last().expect("best-effort response");
    assert_eq!(published.topic, Topic::TaskCompleted);
    assert_eq!(published.response.correlation_key, "c9");
    assert_eq!(published.response.error_code, Some(ErrorCode::UnknownError));
    assert_eq!(published.response.message, "Error completing task");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publish_failure_does_not_change_settlement() {
    let mut publisher = MockResponsePublisher::new();
    publisher
        .expect_publish()
        .times(1)
        .returning(|_, _| Err(PublishError::transport(std::io::Error::other("broker down"))));
    let store = Arc::new(InMemoryDocumentStore::new());
    let dispatcher = Dispatcher::new(
        Arc::clone(&store),
        Arc::new(publisher),
        Arc::new(DefaultClock),
    );
    let payload = bytes(&json!({"correlationKey": "c", "id": "u1", "email": "a@b.io"}));

    let acknowledgement = dispatcher
        .dispatch(Topic::UserCreated.request_name(), &payload)
        .await;

    assert_eq!(acknowledgement, Acknowledgement::Ack);
    assert_eq!(store.count(Collection::Users).expect("count"), 1);
}
