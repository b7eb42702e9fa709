//! Command schemas for the task topics.

use super::{TaskRecord, TaskStatus};
use crate::{
    bus::domain::CommandEnvelope,
    validation::{PayloadReader, ValidationResult},
};
use serde::Serialize;
use serde_json::Value;

/// Validated `task.created` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskCommand {
    /// Correlation key and task id.
    pub envelope: CommandEnvelope,
    /// Owning project id.
    pub project_id: String,
    /// Task name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Due date as supplied.
    pub due_date: Option<String>,
    /// Initial status; defaults to [`TaskStatus::Created`].
    pub status: Option<TaskStatus>,
}

impl CreateTaskCommand {
    /// Validates a raw `task.created` payload.
    ///
    /// A supplied `taskMembers` list is type-checked and then dropped, so a
    /// new task always starts with no members; members only join a task
    /// through assignment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] listing every missing
    /// or malformed field.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let project_id = reader.required_string("projectId");
        let name = reader.required_string("name");
        let description = reader.optional_string("description");
        reader.optional_string_list("taskMembers");
        let due_date = reader.optional_string("dueDate");
        let status = reader.optional_variant("status", TaskStatus::NAMES);
        let command = envelope
            .zip(project_id)
            .zip(name)
            .map(|((envelope, project_id), name)| Self {
                envelope,
                project_id,
                name,
                description,
                due_date,
                status,
            });
        reader.finish(command)
    }

    /// Builds the record to store.
    #[must_use]
    pub fn into_record(self) -> TaskRecord {
        TaskRecord {
            id: self.envelope.id,
            project_id: self.project_id,
            name: self.name,
            description: self.description,
            task_members: Vec::new(),
            due_date: self.due_date,
            status: self.status.unwrap_or_default(),
            completed_by: None,
            complete_at: None,
        }
    }
}

/// Fields a `task.updated` command may overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New name; never empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// New status, applied without transition checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Validated `task.updated` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskCommand {
    /// Correlation key and task id.
    pub envelope: CommandEnvelope,
    /// Fields to merge.
    pub patch: TaskPatch,
}

impl UpdateTaskCommand {
    /// Validates a raw `task.updated` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] listing every missing
    /// or malformed field.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let patch = TaskPatch {
            name: reader.optional_non_empty_string("name"),
            description: reader.optional_string("description"),
            due_date: reader.optional_string("dueDate"),
            status: reader.optional_variant("status", TaskStatus::NAMES),
        };
        let command = envelope.map(|envelope| Self { envelope, patch });
        reader.finish(command)
    }
}

/// Validated `task.assigned` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskCommand {
    /// Correlation key and task id.
    pub envelope: CommandEnvelope,
    /// User to append to the task's members.
    pub member_id: String,
}

impl AssignTaskCommand {
    /// Validates a raw `task.assigned` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] when the envelope or
    /// `memberId` is missing or malformed.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let member_id = reader.required_string("memberId");
        let command = envelope
            .zip(member_id)
            .map(|(envelope, member_id)| Self {
                envelope,
                member_id,
            });
        reader.finish(command)
    }
}

/// Validated `task.completed` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTaskCommand {
    /// Correlation key and task id.
    pub envelope: CommandEnvelope,
    /// Member completing the task.
    pub completed_by: String,
}

impl CompleteTaskCommand {
    /// Validates a raw `task.completed` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] when the envelope or
    /// `completedBy` is missing or malformed.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let completed_by = reader.required_string("completedBy");
        let command = envelope
            .zip(completed_by)
            .map(|(envelope, completed_by)| Self {
                envelope,
                completed_by,
            });
        reader.finish(command)
    }
}
