//! Handler for the `project.*` command topics.

use crate::{
    bus::{
        domain::{CommandEnvelope, ErrorCode, Response, Topic},
        ports::ResponsePublisher,
    },
    handler::{HandlerResult, publish_response, reject_invalid},
    project::domain::{CreateProjectCommand, ProjectRecord, UpdateProjectCommand},
    store::{
        DocumentStore, StoreError,
        records::{insert, merge, remove},
    },
    validation::ValidationError,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const INVALID_PROJECT_DATA: &str = "Invalid project data";

/// Project lifecycle handler.
#[derive(Clone)]
pub struct ProjectService<S, P>
where
    S: DocumentStore,
    P: ResponsePublisher,
{
    store: Arc<S>,
    publisher: Arc<P>,
}

impl<S, P> ProjectService<S, P>
where
    S: DocumentStore,
    P: ResponsePublisher,
{
    /// Creates a project handler.
    #[must_use]
    pub const fn new(store: Arc<S>, publisher: Arc<P>) -> Self {
        Self { store, publisher }
    }

    async fn respond(&self, topic: Topic, response: Response) -> Response {
        publish_response(&*self.publisher, topic, response).await
    }

    async fn reject(&self, topic: Topic, payload: &Value, err: &ValidationError) -> Response {
        reject_invalid(&*self.publisher, topic, payload, err, INVALID_PROJECT_DATA).await
    }

    /// Handles `project.created`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn create(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::ProjectCreated;
        let command = match CreateProjectCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let envelope = command.envelope.clone();
        let response = match insert(&*self.store, &command.into_record()).await {
            Ok(()) => {
                info!("project created");
                Response::success(&envelope, "Project created successfully")
            }
            Err(StoreError::AlreadyExists { .. }) => {
                info!("project already exists");
                Response::failure(
                    &envelope,
                    ErrorCode::ProjectAlreadyExists,
                    "Project already exists",
                )
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    /// Handles `project.updated`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn update(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::ProjectUpdated;
        let command = match UpdateProjectCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let envelope = &command.envelope;
        let merged =
            merge::<ProjectRecord, _, _>(&*self.store, &envelope.id, &command.patch).await;
        let response = match merged {
            Ok(()) => {
                info!("project updated");
                Response::success(envelope, "Project updated successfully")
            }
            Err(StoreError::NotFound { .. }) => {
                return Ok(self.not_found(topic, envelope, "skipping update").await);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    /// Handles `project.deleted`. Tasks referencing the project are kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn delete(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::ProjectDeleted;
        let envelope = match CommandEnvelope::parse(payload) {
            Ok(envelope) => envelope,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let response = match remove::<ProjectRecord, _>(&*self.store, &envelope.id).await {
            Ok(()) => {
                info!("project deleted");
                Response::success(&envelope, "Project deleted successfully")
            }
            Err(StoreError::NotFound { .. }) => {
                return Ok(self.not_found(topic, &envelope, "skipping deletion").await);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    async fn not_found(&self, topic: Topic, envelope: &CommandEnvelope, action: &str) -> Response {
        info!("project does not exist, {action}");
        let response =
            Response::failure(envelope, ErrorCode::ProjectNotFound, "Project does not exist");
        self.respond(topic, response).await
    }
}
