//! Stored task record and its state checks.

use super::{TaskPatch, TaskRuleViolation, TaskStatus};
use crate::{
    project::domain::ProjectRecord,
    store::{Collection, Record},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task document in the `tasks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Caller-supplied identifier.
    pub id: String,
    /// Owning project id; not checked at creation time.
    pub project_id: String,
    /// Task name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned members in assignment order; may repeat.
    #[serde(default)]
    pub task_members: Vec<String>,
    /// Due date as supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Member who completed the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    /// Completion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_at: Option<DateTime<Utc>>,
}

/// Store patch written by a successful assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersPatch {
    /// Full member sequence after the append.
    pub task_members: Vec<String>,
}

/// Store patch written by a successful completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPatch {
    /// Always [`TaskStatus::Completed`].
    pub status: TaskStatus,
    /// Completing member.
    pub completed_by: String,
    /// Completion time.
    pub complete_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Refuses tasks in a terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuleViolation::NotPending`] when the status is terminal.
    pub const fn ensure_pending(&self) -> Result<(), TaskRuleViolation> {
        if self.status.is_terminal() {
            Err(TaskRuleViolation::NotPending)
        } else {
            Ok(())
        }
    }

    /// Appends `member_id` after checking it belongs to `project`.
    ///
    /// Repeated assignment of the same member appends again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuleViolation::NotPending`] for a terminal task, then
    /// [`TaskRuleViolation::NotInProject`] for a non-member.
    pub fn assign_member(
        &mut self,
        project: &ProjectRecord,
        member_id: &str,
    ) -> Result<MembersPatch, TaskRuleViolation> {
        self.ensure_pending()?;
        if !project.has_member(member_id) {
            return Err(TaskRuleViolation::NotInProject);
        }
        self.task_members.push(member_id.to_owned());
        Ok(MembersPatch {
            task_members: self.task_members.clone(),
        })
    }

    /// Marks the task completed by `member_id` at the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuleViolation::NotPending`] for a terminal task, then
    /// [`TaskRuleViolation::NotTaskMember`] when `member_id` is unassigned.
    pub fn complete(
        &mut self,
        member_id: &str,
        clock: &impl Clock,
    ) -> Result<CompletionPatch, TaskRuleViolation> {
        self.ensure_pending()?;
        if !self.task_members.iter().any(|member| member == member_id) {
            return Err(TaskRuleViolation::NotTaskMember);
        }
        let complete_at = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_by = Some(member_id.to_owned());
        self.complete_at = Some(complete_at);
        Ok(CompletionPatch {
            status: self.status,
            completed_by: member_id.to_owned(),
            complete_at,
        })
    }

    /// Applies the supplied fields of an update. Status is taken as given.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if patch.description.is_some() {
            self.description.clone_from(&patch.description);
        }
        if patch.due_date.is_some() {
            self.due_date.clone_from(&patch.due_date);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Record for TaskRecord {
    const COLLECTION: Collection = Collection::Tasks;

    fn id(&self) -> &str {
        &self.id
    }
}
