//! Handler for the task create, update and delete topics.

use crate::{
    bus::{
        domain::{CommandEnvelope, ErrorCode, Response, ResponseData, Topic},
        ports::ResponsePublisher,
    },
    handler::{HandlerResult, publish_response, reject_invalid},
    store::{
        DocumentStore, StoreError,
        records::{fetch, insert, merge, remove},
    },
    task::domain::{CreateTaskCommand, TaskRecord, UpdateTaskCommand},
    validation::ValidationError,
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const INVALID_TASK_DATA: &str = "Invalid task data";

/// Task lifecycle handler, including assignment and completion.
#[derive(Clone)]
pub struct TaskService<S, P, C>
where
    S: DocumentStore,
    P: ResponsePublisher,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    publisher: Arc<P>,
    pub(super) clock: Arc<C>,
}

impl<S, P, C> TaskService<S, P, C>
where
    S: DocumentStore,
    P: ResponsePublisher,
    C: Clock + Send + Sync,
{
    /// Creates a task handler.
    #[must_use]
    pub const fn new(store: Arc<S>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            store,
            publisher,
            clock,
        }
    }

    pub(super) async fn respond(&self, topic: Topic, response: Response) -> Response {
        publish_response(&*self.publisher, topic, response).await
    }

    pub(super) async fn reject(
        &self,
        topic: Topic,
        payload: &Value,
        err: &ValidationError,
    ) -> Response {
        reject_invalid(&*self.publisher, topic, payload, err, INVALID_TASK_DATA).await
    }

    pub(super) async fn task_not_found(&self, topic: Topic, envelope: &CommandEnvelope) -> Response {
        info!("task does not exist");
        let response = Response::failure(envelope, ErrorCode::TaskNotFound, "Task does not exist");
        self.respond(topic, response).await
    }

    /// Handles `task.created`. The project reference is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn create(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::TaskCreated;
        let command = match CreateTaskCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let envelope = command.envelope.clone();
        let response = match insert(&*self.store, &command.into_record()).await {
            Ok(()) => {
                info!("task created");
                Response::success(&envelope, "Task created successfully")
            }
            Err(StoreError::AlreadyExists { .. }) => {
                info!("task already exists");
                Response::failure(&envelope, ErrorCode::TaskAlreadyExists, "Task already exists")
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    /// Handles `task.updated`: merges the supplied fields, status included,
    /// and reports the merged view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn update(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::TaskUpdated;
        let command = match UpdateTaskCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let envelope = &command.envelope;
        let Some(mut task) = fetch::<TaskRecord, _>(&*self.store, &envelope.id).await? else {
            return Ok(self.task_not_found(topic, envelope).await);
        };
        match merge::<TaskRecord, _, _>(&*self.store, &envelope.id, &command.patch).await {
            Ok(()) => {}
            Err(StoreError::NotFound { .. }) => {
                return Ok(self.task_not_found(topic, envelope).await);
            }
            Err(err) => return Err(err.into()),
        }
        task.apply(&command.patch);
        info!(status = %task.status, "task updated");
        let data = ResponseData::TaskUpdated {
            description: task.description,
            task_members: task.task_members,
            due_date: task.due_date,
            status: task.status,
        };
        let response = Response::success(envelope, "Task updated successfully").with_data(data);
        Ok(self.respond(topic, response).await)
    }

    /// Handles `task.deleted`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn delete(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::TaskDeleted;
        let envelope = match CommandEnvelope::parse(payload) {
            Ok(envelope) => envelope,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let response = match remove::<TaskRecord, _>(&*self.store, &envelope.id).await {
            Ok(()) => {
                info!("task deleted");
                Response::success(&envelope, "Task deleted successfully")
            }
            Err(StoreError::NotFound { .. }) => {
                return Ok(self.task_not_found(topic, &envelope).await);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }
}
