//! Assignment and completion handling for tasks.

use super::TaskService;
use crate::{
    bus::{
        domain::{CommandEnvelope, ErrorCode, Response, ResponseData, Topic},
        ports::ResponsePublisher,
    },
    handler::HandlerResult,
    project::domain::ProjectRecord,
    store::{
        DocumentStore, StoreError,
        records::{fetch, merge},
    },
    task::domain::{AssignTaskCommand, CompleteTaskCommand, TaskRecord, TaskRuleViolation},
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

impl<S, P, C> TaskService<S, P, C>
where
    S: DocumentStore,
    P: ResponsePublisher,
    C: Clock + Send + Sync,
{
    /// Handles `task.assigned`.
    ///
    /// Checks run in order and the first failure is reported: task exists,
    /// task is not terminal, project exists, member belongs to the project.
    /// On success the member is appended, even if already assigned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn assign(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::TaskAssigned;
        let command = match AssignTaskCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let envelope = &command.envelope;
        let Some(mut task) = fetch::<TaskRecord, _>(&*self.store, &envelope.id).await? else {
            return Ok(self.task_not_found(topic, envelope).await);
        };
        if let Err(violation) = task.ensure_pending() {
            return Ok(self.refuse(topic, envelope, violation).await);
        }
        let Some(project) = fetch::<ProjectRecord, _>(&*self.store, &task.project_id).await? else {
            info!(project_id = %task.project_id, "task project does not exist");
            let response =
                Response::failure(envelope, ErrorCode::ProjectNotFound, "Project does not exist");
            return Ok(self.respond(topic, response).await);
        };
        let patch = match task.assign_member(&project, &command.member_id) {
            Ok(patch) => patch,
            Err(violation) => return Ok(self.refuse(topic, envelope, violation).await),
        };
        if !self.write(topic, envelope, &patch).await? {
            return Ok(self.task_not_found(topic, envelope).await);
        }
        info!(member_id = %command.member_id, "task assigned");
        let response = Response::success(envelope, "Task assigned successfully").with_data(
            ResponseData::TaskAssigned {
                task_members: patch.task_members,
            },
        );
        Ok(self.respond(topic, response).await)
    }

    /// Handles `task.completed`.
    ///
    /// Checks run in order: task exists, task is not terminal, completer is
    /// an assigned member. On success the status becomes `completed` and
    /// the completer and completion time are recorded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::handler::HandlerError`] when the store fails.
    pub async fn complete(&self, payload: &Value) -> HandlerResult<Response> {
        let topic = Topic::TaskCompleted;
        let command = match CompleteTaskCommand::parse(payload) {
            Ok(command) => command,
            Err(err) => return Ok(self.reject(topic, payload, &err).await),
        };
        let envelope = &command.envelope;
        let Some(mut task) = fetch::<TaskRecord, _>(&*self.store, &envelope.id).await? else {
            return Ok(self.task_not_found(topic, envelope).await);
        };
        let patch = match task.complete(&command.completed_by, &*self.clock) {
            Ok(patch) => patch,
            Err(violation) => return Ok(self.refuse(topic, envelope, violation).await),
        };
        if !self.write(topic, envelope, &patch).await? {
            return Ok(self.task_not_found(topic, envelope).await);
        }
        info!(completed_by = %patch.completed_by, "task completed");
        let response = Response::success(envelope, "Task completed successfully").with_data(
            ResponseData::TaskCompleted {
                completed_by: patch.completed_by,
                status: patch.status,
            },
        );
        Ok(self.respond(topic, response).await)
    }

    async fn refuse(
        &self,
        topic: Topic,
        envelope: &CommandEnvelope,
        violation: TaskRuleViolation,
    ) -> Response {
        info!(%violation, "task command refused");
        let response = Response::failure(envelope, violation.error_code(), violation.to_string());
        self.respond(topic, response).await
    }

    /// Merges `patch` into the task. Returns `false` when the task vanished
    /// since it was read.
    async fn write<T>(
        &self,
        topic: Topic,
        envelope: &CommandEnvelope,
        patch: &T,
    ) -> HandlerResult<bool>
    where
        T: Serialize + Sync,
    {
        match merge::<TaskRecord, _, _>(&*self.store, &envelope.id, patch).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound { .. }) => {
                info!(topic = topic.request_name(), "task deleted concurrently");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}
