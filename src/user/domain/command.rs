//! Command schemas for the user topics.

use super::UserRecord;
use crate::{
    bus::domain::CommandEnvelope,
    validation::{PayloadReader, ValidationResult},
};
use serde::Serialize;
use serde_json::Value;

/// Validated `user.created` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserCommand {
    /// Correlation key and user id.
    pub envelope: CommandEnvelope,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
}

impl CreateUserCommand {
    /// Validates a raw `user.created` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] listing every missing
    /// or malformed field.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let email = reader.required_email("email");
        let name = reader.optional_string("name");
        let command = envelope
            .zip(email)
            .map(|(envelope, email)| Self {
                envelope,
                email,
                name,
            });
        reader.finish(command)
    }

    /// Builds the record to store.
    #[must_use]
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            id: self.envelope.id,
            email: self.email,
            name: self.name,
        }
    }
}

/// Fields a `user.updated` command may overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Validated `user.updated` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserCommand {
    /// Correlation key and user id.
    pub envelope: CommandEnvelope,
    /// Fields to merge.
    pub patch: UserPatch,
}

impl UpdateUserCommand {
    /// Validates a raw `user.updated` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] listing every missing
    /// or malformed field.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let patch = UserPatch {
            email: reader.optional_email("email"),
            name: reader.optional_string("name"),
        };
        let command = envelope.map(|envelope| Self { envelope, patch });
        reader.finish(command)
    }
}
