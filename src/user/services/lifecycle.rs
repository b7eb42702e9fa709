//! Handler for the `user.*` command topics.

use crate::{
    bus::{
        domain::{CommandEnvelope, ErrorCode, Response, Topic},
        ports::ResponsePublisher,
    },
    handler::{HandlerResult, publish_response, reject_invalid},
    store::{
        DocumentStore, StoreError,
        records::{insert, merge, remove},
    },
    user::domain::{CreateUserCommand, UpdateUserCommand, UserRecord},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const INVALID_USER_DATA: &str = "Invalid user data";

/// User lifecycle handler.
#[derive(Clone)]
pub struct UserService<S, P>
where
    S: DocumentStore,
    P: ResponsePublisher,
{
    store: Arc<S>,
    publisher: Arc<P>,
}

impl<S, P> UserService<S, P>
where
    S: DocumentStore,
    P: ResponsePublisher,
{
    /// Creates a user handler.
    #[must_use]
    pub const fn new(store: Arc<S>, publisher: Arc<P>) -> Self {
        Self { store, publisher }
    }

    async fn respond(&self, topic: Topic, response: Response) -> Response {
        publish_response(&*self.publisher, topic, response).await
    }

    /// Handles `user.created`: stores the user unless the id is taken.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn create(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::UserCreated;
        let command = match CreateUserCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => {
                return Ok(
                    reject_invalid(&*self.publisher, topic, payload, &err, INVALID_USER_DATA).await,
                );
            }
        };
        let envelope = command.envelope.clone();
        let response = match insert(&*self.store, &command.into_record()).await {
            Ok(()) => {
                info!("user created");
                Response::success(&envelope, "User created successfully")
            }
            Err(StoreError::AlreadyExists { .. }) => {
                info!("user already exists");
                Response::failure(&envelope, ErrorCode::UserAlreadyExists, "User already exists")
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    /// Handles `user.updated`: merges supplied fields into an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn update(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::UserUpdated;
        let command = match UpdateUserCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => {
                return Ok(
                    reject_invalid(&*self.publisher, topic, payload, &err, INVALID_USER_DATA).await,
                );
            }
        };
        let envelope = &command.envelope;
        let merged = merge::<UserRecord, _, _>(&*self.store, &envelope.id, &command.patch).await;
        let response = match merged {
            Ok(()) => {
                info!("user updated");
                Response::success(envelope, "User updated successfully")
            }
            Err(StoreError::NotFound { .. }) => {
                return Ok(self.not_found(topic, envelope, "skipping update").await);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    /// Handles `user.deleted`: removes an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn delete(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::UserDeleted;
        let envelope = match CommandEnvelope::parse(payload) {
            Ok(envelope) => envelope,
            Err(err) => {
                return Ok(
                    reject_invalid(&*self.publisher, topic, payload, &err, INVALID_USER_DATA).await,
                );
            }
        };
        let response = match remove::<UserRecord, _>(&*self.store, &envelope.id).await {
            Ok(()) => {
                info!("user deleted");
                Response::success(&envelope, "User deleted successfully")
            }
            Err(StoreError::NotFound { .. }) => {
                return Ok(self.not_found(topic, &envelope, "skipping deletion").await);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.respond(topic, response).await)
    }

    async fn not_found(&self, topic: Topic, envelope: &CommandEnvelope, action: &str) -> Response {
        info!("user does not exist, {action}");
        let response = Response::failure(envelope, ErrorCode::UserNotFound, "User does not exist");
        self.respond(topic, response).await
    }
}
