//! Outcome message published for every handled command.

use super::{CommandEnvelope, ErrorCode};
use crate::task::domain::TaskStatus;
use serde::Serialize;

/// Response envelope published on a command's response topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Correlation key copied from the command.
    pub correlation_key: String,
    /// Target entity identifier copied from the command.
    pub id: String,
    /// `true` when the command was applied.
    pub status: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Failure code; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    /// Kind-specific payload for successful task commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl Response {
    /// Builds a success response.
    #[must_use]
    pub fn success(envelope: &CommandEnvelope, message: impl Into<String>) -> Self {
        Self {
            correlation_key: envelope.correlation_key.clone(),
            id: envelope.id.clone(),
            status: true,
            message: message.into(),
            error_code: None,
            data: None,
        }
    }

    /// Builds a failure response.
    #[must_use]
    pub fn failure(
        envelope: &CommandEnvelope,
        error_code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            correlation_key: envelope.correlation_key.clone(),
            id: envelope.id.clone(),
            status: false,
            message: message.into(),
            error_code: Some(error_code),
            data: None,
        }
    }

    /// Attaches a kind-specific payload.
    #[must_use]
    pub fn with_data(mut self, data: ResponseData) -> Self {
        self.data = Some(data);
        self
    }

    /// Serializes the response to UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; not expected for this type.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Kind-specific response payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Post-merge view of an updated task.
    #[serde(rename_all = "camelCase")]
    TaskUpdated {
        /// Task description, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// Assigned members in assignment order.
        task_members: Vec<String>,
        /// Due date, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        due_date: Option<String>,
        /// Current status.
        status: TaskStatus,
    },
    /// Members after a successful assignment.
    #[serde(rename_all = "camelCase")]
    TaskAssigned {
        /// Assigned members in assignment order.
        task_members: Vec<String>,
    },
    /// Completion details.
    #[serde(rename_all = "camelCase")]
    TaskCompleted {
        /// Member who completed the task.
        completed_by: String,
        /// Status after completion.
        status: TaskStatus,
    },
}
