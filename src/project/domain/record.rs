//! Stored project record.

use crate::store::{Collection, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A project document in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Caller-supplied identifier.
    pub id: String,
    /// Project name; never empty.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifier of the owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// User ids allowed to be assigned to the project's tasks.
    #[serde(default)]
    pub members: BTreeSet<String>,
}

impl ProjectRecord {
    /// Returns `true` when `user_id` is a project member.
    #[must_use]
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.contains(user_id)
    }
}

impl Record for ProjectRecord {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> &str {
        &self.id
    }
}
