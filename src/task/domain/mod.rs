//! Domain model for tasks.
//!
//! A task belongs to a project by id, collects members through assignment
//! and ends in one of the terminal statuses. The assignment and completion
//! preconditions live on [`TaskRecord`] so the handler only sequences store
//! reads and writes around them.

mod command;
mod error;
mod record;
mod status;

pub use command::{
    AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, TaskPatch, UpdateTaskCommand,
};
pub use error::{ParseTaskStatusError, TaskRuleViolation};
pub use record::{CompletionPatch, MembersPatch, TaskRecord};
pub use status::TaskStatus;
