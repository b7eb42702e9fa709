//! Error types for task rules and parsing.

use crate::bus::domain::ErrorCode;
use thiserror::Error;

/// A task precondition that refused an assignment or completion.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskRuleViolation {
    /// The task already reached a terminal status.
    #[error("Task not in progress")]
    NotPending,

    /// The member does not belong to the task's project.
    #[error("User is not a member of the project")]
    NotInProject,

    /// The completer is not assigned to the task.
    #[error("User is not a member of the task")]
    NotTaskMember,
}

impl TaskRuleViolation {
    /// Returns the response error code for this violation.
    #[must_use]
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::NotPending => ErrorCode::TaskNotPending,
            Self::NotInProject => ErrorCode::UserNotInProject,
            Self::NotTaskMember => ErrorCode::TaskMemberNotFound,
        }
    }
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
