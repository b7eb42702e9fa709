//! Topic-to-handler routing for inbound deliveries.

use crate::{
    bus::{
        domain::{Acknowledgement, CommandEnvelope, ErrorCode, Response, Topic},
        ports::ResponsePublisher,
    },
    handler::{HandlerResult, publish_response},
    project::services::ProjectService,
    store::DocumentStore,
    task::services::TaskService,
    user::services::UserService,
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, error, field, info_span, warn};

/// Routes each delivery to the handler owning its topic and decides how the
/// delivery is settled.
///
/// Business outcomes, including refusals and invalid payloads, are
/// acknowledged. Infrastructure failures are negatively acknowledged after a
/// best-effort `unknownError` response.
pub struct Dispatcher<S, P, C>
where
    S: DocumentStore,
    P: ResponsePublisher,
    C: Clock + Send + Sync,
{
    users: UserService<S, P>,
    projects: ProjectService<S, P>,
    tasks: TaskService<S, P, C>,
    publisher: Arc<P>,
}

impl<S, P, C> Dispatcher<S, P, C>
where
    S: DocumentStore,
    P: ResponsePublisher,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher whose handlers share `store`, `publisher` and
    /// `clock`.
    #[must_use]
    pub fn new(store: Arc<S>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&publisher)),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&publisher)),
            tasks: TaskService::new(store, Arc::clone(&publisher), clock),
            publisher,
        }
    }

    /// Handles one delivery and returns how it should be settled.
    ///
    /// Deliveries on unknown topics are logged and acknowledged without a
    /// response. A payload that is not JSON is handed to its handler as
    /// `null`, answered with `invalidMessageData` and acknowledged, never
    /// nacked for redelivery.
    pub async fn dispatch(&self, topic_name: &str, raw: &[u8]) -> Acknowledgement {
        let Ok(topic) = Topic::try_from(topic_name) else {
            warn!(topic = topic_name, "dropping delivery on unknown topic");
            return Acknowledgement::Ack;
        };
        let payload = serde_json::from_slice::<Value>(raw).unwrap_or_else(|err| {
            warn!(topic = topic.request_name(), error = %err, "payload is not JSON");
            Value::Null
        });
        let envelope = CommandEnvelope::lenient(&payload);
        let span = info_span!(
            "command",
            topic = topic.request_name(),
            correlation_key = field::Empty,
            id = field::Empty,
        );
        if !envelope.correlation_key.is_empty() {
            span.record("correlation_key", envelope.correlation_key.as_str());
        }
        if !envelope.id.is_empty() {
            span.record("id", envelope.id.as_str());
        }
        async {
            match self.route(topic, &payload).await {
                Ok(response) => {
                    debug!(status = response.status, "command handled");
                    Acknowledgement::Ack
                }
                Err(err) => {
                    error!(error = %err, "command failed");
                    let message = failure_message(topic);
                    let response = Response::failure(&envelope, ErrorCode::UnknownError, message);
                    publish_response(&*self.publisher, topic, response).await;
                    Acknowledgement::Nack
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn route(&self, topic: Topic, payload: &Value) -> HandlerResult<Response> {
        match topic {
            Topic::UserCreated => self.users.create(payload).await,
            Topic::UserUpdated => self.users.update(payload).await,
            Topic::UserDeleted => self.users.delete(payload).await,
            Topic::ProjectCreated => self.projects.create(payload).await,
            Topic::ProjectUpdated => self.projects.update(payload).await,
            Topic::ProjectDeleted => self.projects.delete(payload).await,
            Topic::TaskCreated => self.tasks.create(payload).await,
            Topic::TaskUpdated => self.tasks.update(payload).await,
            Topic::TaskDeleted => self.tasks.delete(payload).await,
            Topic::TaskAssigned => self.tasks.assign(payload).await,
            Topic::TaskCompleted => self.tasks.complete(payload).await,
        }
    }
}

const fn failure_message(topic: Topic) -> &'static str {
    match topic {
        Topic::UserCreated => "Error creating user",
        Topic::UserUpdated => "Error updating user",
        Topic::UserDeleted => "Error deleting user",
        Topic::ProjectCreated => "Error creating project",
        Topic::ProjectUpdated => "Error updating project",
        Topic::ProjectDeleted => "Error deleting project",
        Topic::TaskCreated => "Error creating task",
        Topic::TaskUpdated => "Error updating task",
        Topic::TaskDeleted => "Error deleting task",
        Topic::TaskAssigned => "Error assigning task",
        Topic::TaskCompleted => "Error completing task",
    }
}
