//! Shared fixtures for task tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use serde_json::{Value, json};

use crate::{
    bus::adapters::RecordingPublisher, store::adapters::InMemoryDocumentStore,
    task::services::TaskService,
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub type TestService = TaskService<InMemoryDocumentStore, RecordingPublisher, FixedClock>;

pub struct Harness {
    pub store: Arc<InMemoryDocumentStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub service: TestService,
}

#[fixture]
pub fn harness() -> Harness {
    let store = Arc::new(InMemoryDocumentStore::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let service = TaskService::new(
        Arc::clone(&store),
        Arc::clone(&publisher),
        Arc::new(FixedClock(instant())),
    );
    Harness {
        store,
        publisher,
        service,
    }
}

pub fn task_payload(correlation_key: &str, id: &str, project_id: &str) -> Value {
    json!({
        "correlationKey": correlation_key,
        "id": id,
        "projectId": project_id,
        "name": "Write the report",
    })
}
