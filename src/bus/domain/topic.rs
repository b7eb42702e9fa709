//! Inbound command topics and their response counterparts.

use std::fmt;
use thiserror::Error;

/// A command topic; each inbound topic has exactly one response topic.
///
/// Routing matches on this enum, so adding a topic forces every dispatch
/// site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// `user.created`
    UserCreated,
    /// `user.updated`
    UserUpdated,
    /// `user.deleted`
    UserDeleted,
    /// `project.created`
    ProjectCreated,
    /// `project.updated`
    ProjectUpdated,
    /// `project.deleted`
    ProjectDeleted,
    /// `task.created`
    TaskCreated,
    /// `task.updated`
    TaskUpdated,
    /// `task.deleted`
    TaskDeleted,
    /// `task.assigned`
    TaskAssigned,
    /// `task.completed`
    TaskCompleted,
}

/// Error returned for a topic name outside the closed set of request topics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request topic: {0}")]
pub struct UnknownTopicError(pub String);

impl Topic {
    /// Every topic, users first, then projects, then tasks.
    pub const ALL: [Self; 11] = [
        Self::UserCreated,
        Self::UserUpdated,
        Self::UserDeleted,
        Self::ProjectCreated,
        Self::ProjectUpdated,
        Self::ProjectDeleted,
        Self::TaskCreated,
        Self::TaskUpdated,
        Self::TaskDeleted,
        Self::TaskAssigned,
        Self::TaskCompleted,
    ];

    /// Returns the inbound topic name.
    #[must_use]
    pub const fn request_name(self) -> &'static str {
        match self {
            Self::UserCreated => "user.created.request",
            Self::UserUpdated => "user.updated.request",
            Self::UserDeleted => "user.deleted.request",
            Self::ProjectCreated => "project.created.request",
            Self::ProjectUpdated => "project.updated.request",
            Self::ProjectDeleted => "project.deleted.request",
            Self::TaskCreated => "task.created.request",
            Self::TaskUpdated => "task.updated.request",
            Self::TaskDeleted => "task.deleted.request",
            Self::TaskAssigned => "task.assigned.request",
            Self::TaskCompleted => "task.completed.request",
        }
    }

    /// Returns the outbound topic name for outcomes of this command.
    #[must_use]
    pub const fn response_name(self) -> &'static str {
        match self {
            Self::UserCreated => "user.created.response",
            Self::UserUpdated => "user.updated.response",
            Self::UserDeleted => "user.deleted.response",
            Self::ProjectCreated => "project.created.response",
            Self::ProjectUpdated => "project.updated.response",
            Self::ProjectDeleted => "project.deleted.response",
            Self::TaskCreated => "task.created.response",
            Self::TaskUpdated => "task.updated.response",
            Self::TaskDeleted => "task.deleted.response",
            Self::TaskAssigned => "task.assigned.response",
            Self::TaskCompleted => "task.completed.response",
        }
    }

    /// Returns the subscription name used to consume this topic.
    #[must_use]
    pub fn subscription_name(self) -> String {
        format!("{}-subscription", self.request_name())
    }
}

impl TryFrom<&str> for Topic {
    type Error = UnknownTopicError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.request_name() == value)
            .ok_or_else(|| UnknownTopicError(value.to_owned()))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.request_name())
    }
}
