//! Domain model for projects.

mod command;
mod record;

pub use command::{CreateProjectCommand, ProjectPatch, UpdateProjectCommand};
pub use record::ProjectRecord;
