//! Closed taxonomy of failure codes carried by responses.

use serde::{Deserialize, Serialize};

/// Failure code reported in a response's `errorCode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The payload failed schema validation.
    #[serde(rename = "invalid.message.data")]
    InvalidMessageData,
    /// No user with the given id exists.
    #[serde(rename = "user.not.found")]
    UserNotFound,
    /// A user with the given id already exists.
    #[serde(rename = "user.already.exists")]
    UserAlreadyExists,
    /// The user is not a member of the task's project.
    #[serde(rename = "user.not.in.project")]
    UserNotInProject,
    /// No project with the given id exists.
    #[serde(rename = "project.not.found")]
    ProjectNotFound,
    /// A project with the given id already exists.
    #[serde(rename = "project.already.exists")]
    ProjectAlreadyExists,
    /// No task with the given id exists.
    #[serde(rename = "task.not.found")]
    TaskNotFound,
    /// A task with the given id already exists.
    #[serde(rename = "task.already.exists")]
    TaskAlreadyExists,
    /// The actor is not assigned to the task.
    #[serde(rename = "task.member.not.found")]
    TaskMemberNotFound,
    /// The task is in a terminal status.
    #[serde(rename = "task.not.pending")]
    TaskNotPending,
    /// Infrastructure failure while handling the command.
    #[serde(rename = "unknown.error")]
    UnknownError,
}

impl ErrorCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidMessageData => "invalid.message.data",
            Self::UserNotFound => "user.not.found",
            Self::UserAlreadyExists => "user.already.exists",
            Self::UserNotInProject => "user.not.in.project",
            Self::ProjectNotFound => "project.not.found",
            Self::ProjectAlreadyExists => "project.already.exists",
            Self::TaskNotFound => "task.not.found",
            Self::TaskAlreadyExists => "task.already.exists",
            Self::TaskMemberNotFound => "task.member.not.found",
            Self::TaskNotPending => "task.not.pending",
            Self::UnknownError => "unknown.error",
        }
    }
}
