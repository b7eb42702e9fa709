//! Command schemas for the project topics.

use super::ProjectRecord;
use crate::{
    bus::domain::CommandEnvelope,
    validation::{PayloadReader, ValidationResult},
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Validated `project.created` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectCommand {
    /// Correlation key and project id.
    pub envelope: CommandEnvelope,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning user id.
    pub owner_id: Option<String>,
    /// Initial members; duplicates collapse.
    pub members: BTreeSet<String>,
}

impl CreateProjectCommand {
    /// Validates a raw `project.created` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] listing every missing
    /// or malformed field.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let name = reader.required_string("name");
        let description = reader.optional_string("description");
        let owner_id = reader.optional_non_empty_string("ownerId");
        let members = reader
            .optional_string_list("members")
            .map(|members| members.into_iter().collect())
            .unwrap_or_default();
        let command = envelope.zip(name).map(|(envelope, name)| Self {
            envelope,
            name,
            description,
            owner_id,
            members,
        });
        reader.finish(command)
    }

    /// Builds the record to store.
    #[must_use]
    pub fn into_record(self) -> ProjectRecord {
        ProjectRecord {
            id: self.envelope.id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
            members: self.members,
        }
    }
}

/// Fields a `project.updated` command may overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// New name; never empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New owner id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Replacement member set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<BTreeSet<String>>,
}

/// Validated `project.updated` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectCommand {
    /// Correlation key and project id.
    pub envelope: CommandEnvelope,
    /// Fields to merge.
    pub patch: ProjectPatch,
}

impl UpdateProjectCommand {
    /// Validates a raw `project.updated` payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] listing every missing
    /// or malformed field.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = CommandEnvelope::read(&mut reader);
        let patch = ProjectPatch {
            name: reader.optional_non_empty_string("name"),
            description: reader.optional_string("description"),
            owner_id: reader.optional_non_empty_string("ownerId"),
            members: reader
                .optional_string_list("members")
                .map(|members| members.into_iter().collect()),
        };
        let command = envelope.map(|envelope| Self { envelope, patch });
        reader.finish(command)
    }
}
